use anyhow::Context as _;

use crate::formats::{ChangeStatus, Course, Lesson};
use crate::report::Report;
use crate::store::ContentStore;
use crate::titles::{LessonTitleRecord, TitlePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Apply,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Apply }
    }

    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// What happened to one lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOutcome {
    Unchanged,
    WouldRename,
    Renamed,
    Failed { error: String },
}

impl LessonOutcome {
    pub fn status(&self) -> ChangeStatus {
        match self {
            Self::Unchanged => ChangeStatus::Unchanged,
            Self::WouldRename => ChangeStatus::WouldRename,
            Self::Renamed => ChangeStatus::Renamed,
            Self::Failed { .. } => ChangeStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonChange {
    pub lesson: LessonTitleRecord,
    pub new_title: String,
    pub outcome: LessonOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Renamed, or would have been in a dry run.
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
    /// Courses skipped because their lessons could not be listed.
    pub course_errors: usize,
    pub dry_run: bool,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: &LessonOutcome) {
        match outcome {
            LessonOutcome::Unchanged => self.unchanged += 1,
            LessonOutcome::WouldRename | LessonOutcome::Renamed => self.renamed += 1,
            LessonOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Walks every course and lesson once, in store order, and renames the
/// lessons whose policy title differs from their current one.
pub struct BatchRenamer<'a> {
    store: &'a dyn ContentStore,
    policy: &'a dyn TitlePolicy,
    mode: RunMode,
}

impl<'a> BatchRenamer<'a> {
    pub fn new(store: &'a dyn ContentStore, policy: &'a dyn TitlePolicy, mode: RunMode) -> Self {
        Self {
            store,
            policy,
            mode,
        }
    }

    /// Fails only when the course listing itself fails; lesson-level and
    /// course-level problems are counted in the summary. Report write errors
    /// are logged and never stop the batch midway.
    pub fn run(&self, report: &mut Report) -> anyhow::Result<BatchSummary> {
        let courses = self.store.list_courses().context("list courses")?;
        tracing::info!(
            policy = self.policy.name(),
            courses = courses.len(),
            dry_run = self.mode.is_dry_run(),
            "batch start"
        );

        let mut summary = BatchSummary {
            dry_run: self.mode.is_dry_run(),
            ..BatchSummary::default()
        };

        for course in &courses {
            let lessons = match self.store.list_lessons(course.id) {
                Ok(lessons) => lessons,
                Err(err) => {
                    tracing::warn!(course_id = course.id, error = %format!("{err:#}"), "skip course");
                    summary.course_errors += 1;
                    continue;
                }
            };
            if lessons.is_empty() {
                tracing::debug!(course_id = course.id, "course has no lessons");
                continue;
            }

            report_step(report.course(course, lessons.len()));
            for lesson in &lessons {
                let change = self.process_lesson(course, lesson);
                summary.record(&change.outcome);
                report_step(report.change(self.policy.name(), &change));
            }
        }

        tracing::info!(
            policy = self.policy.name(),
            renamed = summary.renamed,
            unchanged = summary.unchanged,
            failed = summary.failed,
            course_errors = summary.course_errors,
            "batch done"
        );
        report_step(report.summary(self.policy.name(), &summary));
        Ok(summary)
    }

    fn process_lesson(&self, course: &Course, lesson: &Lesson) -> LessonChange {
        let record = LessonTitleRecord {
            course_id: course.id,
            lesson_id: lesson.id,
            current_title: lesson.title.clone(),
            course_title: course.title.clone(),
        };
        let new_title = self.policy.retitle(&record);

        let outcome = if new_title == record.current_title {
            LessonOutcome::Unchanged
        } else if self.mode.is_dry_run() {
            LessonOutcome::WouldRename
        } else {
            match self.store.rename(lesson.id, &new_title) {
                Ok(()) => {
                    tracing::info!(lesson_id = lesson.id, title = %new_title, "renamed");
                    LessonOutcome::Renamed
                }
                Err(err) => {
                    let error = format!("{err:#}");
                    tracing::warn!(lesson_id = lesson.id, error = %error, "rename failed");
                    LessonOutcome::Failed { error }
                }
            }
        };

        LessonChange {
            lesson: record,
            new_title,
            outcome,
        }
    }
}

fn report_step(result: anyhow::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(error = %format!("{err:#}"), "report write failed");
    }
}
