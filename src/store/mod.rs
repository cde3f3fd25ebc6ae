//! Access to courses and lessons in the WordPress install.

mod rest;
mod wp_cli;

pub use rest::RestStore;
pub use wp_cli::WpCliStore;

use crate::cli::StoreKind;
use crate::config::WordPressConfig;
use crate::formats::{Course, Lesson};

pub trait ContentStore {
    /// Published courses.
    fn list_courses(&self) -> anyhow::Result<Vec<Course>>;

    /// Published and draft lessons of a course, in display order.
    fn list_lessons(&self, course_id: u64) -> anyhow::Result<Vec<Lesson>>;

    fn rename(&self, lesson_id: u64, new_title: &str) -> anyhow::Result<()>;
}

pub fn open(kind: StoreKind, config: &WordPressConfig) -> anyhow::Result<Box<dyn ContentStore>> {
    let store: Box<dyn ContentStore> = match kind {
        StoreKind::WpCli => Box::new(WpCliStore::new(config)),
        StoreKind::Rest => Box::new(RestStore::new(config)?),
    };
    Ok(store)
}
