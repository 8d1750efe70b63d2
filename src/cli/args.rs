use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image_augment")]
#[command(about = "A combinatorial image dataset augmentation tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an augmentation job described by a JSON config file
    Run {
        /// Path to the job config file
        config: PathBuf,

        /// Suppress phase messages and the progress line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a config file and show the expected output counts
    Plan {
        /// Path to the job config file
        config: PathBuf,
    },
}
