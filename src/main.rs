use anyhow::Result;
use clap::Parser;

use image_augment::cli::{execute_plan, execute_run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, quiet } => execute_run(config, quiet).await,
        Commands::Plan { config } => execute_plan(config),
    }
}
