use crate::config::AugmentConfig;
use crate::plan::JobPlan;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a config file and print the expected per-level fanout
///
/// Touches nothing on disk, so it is safe to run against a config
/// whose output directory already exists.
pub fn execute_plan(config_path: PathBuf) -> Result<()> {
    if !config_path.is_file() {
        anyhow::bail!("Config file does not exist: {}", config_path.display());
    }

    let config = AugmentConfig::load(&config_path)?;
    let plan = JobPlan::from_config(&config)?;
    let workers = config.resolved_workers()?;

    println!("  > input        : {}", config.input_path.display());
    println!("  > output       : {}", config.output_path.display());
    println!("  > resize limit : {}", config.resize_limit);
    println!("  > workers      : {workers}");

    if plan.is_empty() {
        println!("  > no jobs: every file is copied and resized only");
    }
    for (index, level) in plan.levels() {
        println!("  > level {index} (fanout {}):", level.fanout());
        for job in &level.jobs {
            println!(
                "      {} x{} ({})",
                job.kind.tag(),
                job.times,
                job.kind.description()
            );
        }
    }
    println!("  > outputs per input file: {}", plan.outputs_per_file());

    Ok(())
}
