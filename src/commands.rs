use std::path::Path;

use anyhow::Context as _;

use crate::batch::{BatchRenamer, BatchSummary, RunMode};
use crate::cli::{BatchArgs, NormalizeArgs};
use crate::config::WordPressConfig;
use crate::report::Report;
use crate::titles::{CoursePrefixer, TitleNormalizer, TitlePolicy};

pub fn improve(args: BatchArgs) -> anyhow::Result<BatchSummary> {
    run_batch(args, &TitleNormalizer::default())
}

pub fn prefix(args: BatchArgs) -> anyhow::Result<BatchSummary> {
    run_batch(args, &CoursePrefixer)
}

pub fn normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let title = TitleNormalizer::default().normalize(
        args.course_id,
        args.lesson_id,
        &args.title,
        &args.course_title,
    );
    println!("{title}");
    Ok(())
}

fn run_batch(args: BatchArgs, policy: &dyn TitlePolicy) -> anyhow::Result<BatchSummary> {
    let config = WordPressConfig::from_env().context("load config")?;
    let errors = config.validate(args.store);
    if !errors.is_empty() {
        anyhow::bail!("configuration errors: {}", errors.join(", "));
    }

    let store = crate::store::open(args.store, &config).context("open content store")?;
    tracing::info!(
        target_site = %config.describe_target(),
        store = ?args.store,
        policy = policy.name(),
        "connected"
    );

    let mut report = Report::stdout();
    if let Some(path) = args.report.as_deref() {
        report = report.with_jsonl(Path::new(path))?;
    }

    let mode = RunMode::from_dry_run(args.dry_run);
    BatchRenamer::new(&*store, policy, mode).run(&mut report)
}
