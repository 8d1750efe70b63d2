use crate::dispatch::RunOptions;
use crate::reporting::{ConsoleReporter, NoOpReporter, RunReporter};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Execute a full augmentation run from a config file
pub async fn execute_run(config_path: PathBuf, quiet: bool) -> Result<()> {
    if !config_path.is_file() {
        anyhow::bail!("Config file does not exist: {}", config_path.display());
    }

    let reporter: Arc<dyn RunReporter> = if quiet {
        Arc::new(NoOpReporter::new())
    } else {
        Arc::new(ConsoleReporter::new())
    };

    let options = RunOptions {
        show_progress: !quiet,
    };
    crate::run_from_config_path(&config_path, reporter, options).await?;

    Ok(())
}
