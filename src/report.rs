use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::batch::{BatchSummary, LessonChange, LessonOutcome};
use crate::formats::{ChangeRecord, Course};

/// Human-readable diff on one writer, plus an optional JSONL change log.
pub struct Report {
    out: Box<dyn Write>,
    jsonl: Option<BufWriter<File>>,
}

impl Report {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out, jsonl: None }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Also write one [`ChangeRecord`] per lesson to `path`, which must not
    /// exist yet.
    pub fn with_jsonl(mut self, path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(path)
            .with_context(|| format!("create report: {}", path.display()))?;
        self.jsonl = Some(BufWriter::new(file));
        Ok(self)
    }

    pub fn course(&mut self, course: &Course, lessons: usize) -> anyhow::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Course {} ({}): {lessons} lessons",
            course.id, course.title
        )?;
        Ok(())
    }

    /// Writes the diff lines and the JSONL record. The record is written even
    /// when the diff writer fails.
    pub fn change(&mut self, policy: &str, change: &LessonChange) -> anyhow::Result<()> {
        let diff = self.write_diff(change);
        let lesson = &change.lesson;
        if let Some(jsonl) = self.jsonl.as_mut() {
            let record = ChangeRecord {
                policy: policy.to_owned(),
                course_id: lesson.course_id,
                lesson_id: lesson.lesson_id,
                old_title: lesson.current_title.clone(),
                new_title: change.new_title.clone(),
                status: change.outcome.status(),
                error: match &change.outcome {
                    LessonOutcome::Failed { error } => Some(error.clone()),
                    _ => None,
                },
            };
            serde_json::to_writer(&mut *jsonl, &record).context("serialize change record")?;
            jsonl.write_all(b"\n").context("write report newline")?;
        }
        diff.context("write diff")
    }

    fn write_diff(&mut self, change: &LessonChange) -> std::io::Result<()> {
        let lesson = &change.lesson;
        match &change.outcome {
            LessonOutcome::Unchanged => {
                writeln!(self.out, "  = {} {}", lesson.lesson_id, lesson.current_title)?;
            }
            outcome => {
                writeln!(self.out, "  ~ {}", lesson.lesson_id)?;
                writeln!(self.out, "      old: {}", lesson.current_title)?;
                writeln!(self.out, "      new: {}", change.new_title)?;
                match outcome {
                    LessonOutcome::WouldRename => writeln!(self.out, "      (dry run)")?,
                    LessonOutcome::Failed { error } => {
                        writeln!(self.out, "      error: {error}")?;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn summary(&mut self, policy: &str, summary: &BatchSummary) -> anyhow::Result<()> {
        let totals = self.write_totals(policy, summary);
        if let Some(jsonl) = self.jsonl.as_mut() {
            jsonl.flush().context("flush change report")?;
        }
        totals.context("write summary")
    }

    fn write_totals(&mut self, policy: &str, summary: &BatchSummary) -> std::io::Result<()> {
        let renamed_label = if summary.dry_run {
            "would rename"
        } else {
            "renamed"
        };
        writeln!(self.out)?;
        writeln!(self.out, "Summary ({policy})")?;
        writeln!(self.out, "  {renamed_label}: {}", summary.renamed)?;
        writeln!(self.out, "  unchanged: {}", summary.unchanged)?;
        writeln!(self.out, "  failed: {}", summary.failed)?;
        if summary.course_errors > 0 {
            writeln!(self.out, "  courses skipped: {}", summary.course_errors)?;
        }
        if summary.dry_run {
            writeln!(
                self.out,
                "Dry run: nothing was written. Run without --dry-run to apply."
            )?;
        }
        self.out.flush()
    }
}
