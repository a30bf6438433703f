//! Stats CLI - fetch usage statistics and print the dashboard they produce.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "stats-cli",
    version,
    about = "Usage statistics dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: stats_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    stats_cmd::run(cli.command).await
}
