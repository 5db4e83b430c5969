use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "job-alert")]
#[command(about = "Polls a job-search API and posts new matches to a Discord webhook")]
pub struct CliArgs {
    /// Optional TOML settings file layered over the environment
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keep running, one cycle every interval
    #[arg(short, long)]
    pub watch: bool,

    /// Override the cycle interval in seconds (watch mode)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Fetch and filter only; send nothing and leave the seen-id file untouched
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
