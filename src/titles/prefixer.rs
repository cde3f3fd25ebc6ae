use crate::titles::{LessonTitleRecord, TitlePolicy};

/// Prepends the full course title to lessons that do not carry it yet.
///
/// The lesson's own title is kept byte for byte; no cleanup runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoursePrefixer;

impl CoursePrefixer {
    pub fn is_prefixed(course_title: &str, current_title: &str) -> bool {
        current_title
            .strip_prefix(course_title)
            .is_some_and(|rest| rest.starts_with(" - "))
    }

    pub fn prefix_if_missing(&self, course_title: &str, current_title: &str) -> String {
        if Self::is_prefixed(course_title, current_title) {
            return current_title.to_owned();
        }
        format!("{course_title} - {current_title}")
    }
}

impl TitlePolicy for CoursePrefixer {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn retitle(&self, lesson: &LessonTitleRecord) -> String {
        self.prefix_if_missing(&lesson.course_title, &lesson.current_title)
    }
}
