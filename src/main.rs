use anyhow::Result;
use clap::Parser;
use gitlab_notifier::cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting gitlab-notifier");
    cli.execute().await?;

    Ok(())
}
