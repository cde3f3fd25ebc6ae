//! Lesson title policies.

mod normalizer;
mod prefixer;
pub mod rules;
pub mod tables;

pub use normalizer::TitleNormalizer;
pub use prefixer::CoursePrefixer;

/// One lesson as seen by a title policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTitleRecord {
    pub course_id: u64,
    pub lesson_id: u64,
    pub current_title: String,
    pub course_title: String,
}

/// A deterministic rewrite of a lesson title.
///
/// Implementations must be pure: the batch driver compares the result with
/// the current title and only renames when they differ.
pub trait TitlePolicy {
    fn name(&self) -> &'static str;

    fn retitle(&self, lesson: &LessonTitleRecord) -> String;
}
