use std::process::{Command, Stdio};

use anyhow::Context as _;
use serde::de::DeserializeOwned;

use crate::config::WordPressConfig;
use crate::formats::{Course, Lesson};
use crate::store::ContentStore;

/// Runs `wp` as a child process, locally or against a remote install
/// through WP-CLI's own `--ssh=` transport.
#[derive(Debug, Clone)]
pub struct WpCliStore {
    bin: String,
    global_args: Vec<String>,
}

impl WpCliStore {
    pub fn new(config: &WordPressConfig) -> Self {
        let mut global_args = Vec::new();
        match config.ssh_target() {
            Some(target) => global_args.push(format!("--ssh={target}")),
            None => {
                if let Some(path) = config.remote_path.as_deref() {
                    global_args.push(format!("--path={path}"));
                }
            }
        }
        Self {
            bin: config.wp_cli_bin.clone(),
            global_args,
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(&self.global_args).args(args);
        cmd
    }

    fn run(&self, args: &[String]) -> anyhow::Result<String> {
        tracing::debug!(bin = %self.bin, ?args, "wp exec");

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("spawn wp-cli: {}", self.bin))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("wp-cli failed ({}): {}", output.status, stderr.trim());
        }

        String::from_utf8(output.stdout).context("wp-cli stdout is not valid UTF-8")
    }

    fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> anyhow::Result<Vec<T>> {
        let stdout = self.run(args)?;
        parse_rows(&stdout)
    }
}

fn list_courses_args() -> Vec<String> {
    [
        "post",
        "list",
        "--post_type=sfwd-courses",
        "--post_status=publish",
        "--fields=ID,post_title",
        "--format=json",
    ]
    .map(str::to_owned)
    .to_vec()
}

fn list_lessons_args(course_id: u64) -> Vec<String> {
    vec![
        "post".to_owned(),
        "list".to_owned(),
        "--post_type=sfwd-lessons".to_owned(),
        "--meta_key=course_id".to_owned(),
        format!("--meta_value={course_id}"),
        "--post_status=publish,draft".to_owned(),
        "--fields=ID,post_title".to_owned(),
        "--orderby=menu_order".to_owned(),
        "--order=ASC".to_owned(),
        "--format=json".to_owned(),
    ]
}

fn rename_args(lesson_id: u64, new_title: &str) -> Vec<String> {
    // Passed as a single argv entry; no shell sees the title.
    vec![
        "post".to_owned(),
        "update".to_owned(),
        lesson_id.to_string(),
        format!("--post_title={new_title}"),
    ]
}

fn parse_rows<T: DeserializeOwned>(stdout: &str) -> anyhow::Result<Vec<T>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("parse wp-cli json output")
}

impl ContentStore for WpCliStore {
    fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        self.run_json(&list_courses_args())
            .context("list courses via wp-cli")
    }

    fn list_lessons(&self, course_id: u64) -> anyhow::Result<Vec<Lesson>> {
        self.run_json(&list_lessons_args(course_id))
            .with_context(|| format!("list lessons of course {course_id} via wp-cli"))
    }

    fn rename(&self, lesson_id: u64, new_title: &str) -> anyhow::Result<()> {
        self.run(&rename_args(lesson_id, new_title))
            .with_context(|| format!("update lesson {lesson_id} via wp-cli"))?;
        Ok(())
    }
}
