use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite lesson titles to "<short course label> - Module NN: <topic>".
    Improve(BatchArgs),
    /// Prepend the full course title to lessons that do not start with it.
    Prefix(BatchArgs),
    /// Print the improved title for a single lesson without touching the site.
    Normalize(NormalizeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Run `wp` locally, or remotely through WP-CLI's `--ssh=`.
    WpCli,
    /// LearnDash v2 REST API.
    Rest,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Preview changes without applying them.
    #[arg(long)]
    pub dry_run: bool,

    /// How to reach the WordPress install.
    #[arg(long, value_enum, default_value_t = StoreKind::WpCli)]
    pub store: StoreKind,

    /// Also write one JSON line per lesson to this file (must not exist).
    #[arg(long)]
    pub report: Option<String>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(long)]
    pub course_id: u64,

    #[arg(long)]
    pub lesson_id: u64,

    /// Current lesson title.
    #[arg(long)]
    pub title: String,

    /// Course title, used as the prefix when the course has no short label.
    #[arg(long, default_value = "")]
    pub course_title: String,
}
