use crate::titles::rules::clean_title;
use crate::titles::tables::{CoursePrefixTable, TitleOverrideTable};
use crate::titles::{LessonTitleRecord, TitlePolicy};

/// Rewrites lesson titles to `"<course prefix> - <body>"`.
///
/// The body is the hand-curated override for the lesson when one exists,
/// otherwise the current title run through the cleanup rules.
#[derive(Debug, Clone, Copy)]
pub struct TitleNormalizer {
    prefixes: &'static CoursePrefixTable,
    overrides: &'static TitleOverrideTable,
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new(CoursePrefixTable::builtin(), TitleOverrideTable::builtin())
    }
}

impl TitleNormalizer {
    pub fn new(
        prefixes: &'static CoursePrefixTable,
        overrides: &'static TitleOverrideTable,
    ) -> Self {
        Self {
            prefixes,
            overrides,
        }
    }

    pub fn resolve_prefix(&self, course_id: u64, course_title: &str) -> String {
        self.prefixes.resolve(course_id, course_title)
    }

    pub fn normalize(
        &self,
        course_id: u64,
        lesson_id: u64,
        current_title: &str,
        course_title: &str,
    ) -> String {
        let prefix = self.resolve_prefix(course_id, course_title);

        let body = match self.overrides.get(course_id, lesson_id) {
            Some(title) => title.to_owned(),
            None => {
                // A title this normalizer already produced carries our prefix;
                // drop it so the cleanup rules only see the body.
                let own_prefix = format!("{prefix} - ");
                let current = current_title
                    .strip_prefix(own_prefix.as_str())
                    .unwrap_or(current_title);
                clean_title(current)
            }
        };

        format!("{prefix} - {body}")
    }
}

impl TitlePolicy for TitleNormalizer {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn retitle(&self, lesson: &LessonTitleRecord) -> String {
        self.normalize(
            lesson.course_id,
            lesson.lesson_id,
            &lesson.current_title,
            &lesson.course_title,
        )
    }
}
