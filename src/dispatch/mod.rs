// Dispatch - 実行全体の監督
// 検証 -> 複製 -> 分配 -> ワーカー/モニタ起動 -> 集計 の順で進める

pub mod mirror;
pub mod partition;
pub mod worker;

pub use mirror::mirror_input;
pub use partition::build_partition;
pub use worker::{spawn_single_worker, spawn_workers};

use crate::config::AugmentConfig;
use crate::core::{AugmentError, AugmentResult, RunSummary};
use crate::engine::AugmentEngine;
use crate::monitor::{spawn_monitor, ProgressCounters};
use crate::plan::JobPlan;
use crate::reporting::RunReporter;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// 実行オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// ステータス行を表示するか
    pub show_progress: bool,
}

/// 設定に従って拡張処理を最後まで実行する
///
/// 設定の検証はディスクに触れる前にすべて済ませる。複製後は
/// ワーカーとモニタを起動し、全ワーカーの合流後にモニタを止めて
/// サマリーを集計する。ワーカーが異常終了してカウンタが総数に
/// 届かない場合でも、停止通知によってモニタは必ず終了する。
pub async fn run(
    config: &AugmentConfig,
    reporter: Arc<dyn RunReporter>,
    options: RunOptions,
) -> AugmentResult<RunSummary> {
    let started = Instant::now();

    let plan = JobPlan::from_config(config)?;
    let workers = config.resolved_workers()?;

    if config.output_path.exists() {
        return Err(AugmentError::output_path(
            config.output_path.display().to_string(),
        ));
    }
    if !config.input_path.is_file() && !config.input_path.is_dir() {
        return Err(AugmentError::input_path(
            config.input_path.display().to_string(),
        ));
    }

    reporter.phase("copy files and dirs").await;
    mirror::mirror_input(&config.input_path, &config.output_path)?;

    let partition = partition::build_partition(&config.output_path, workers)?;
    let total_files: usize = partition.iter().map(|bucket| bucket.len()).sum();

    reporter
        .phase(&format!("start processing with {workers} workers"))
        .await;

    let engine = Arc::new(AugmentEngine::new(plan, config.resize_limit));
    let counters = ProgressCounters::new(workers);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = options
        .show_progress
        .then(|| spawn_monitor(counters.clone(), total_files, shutdown_rx));

    let handles = spawn_workers(engine, partition, &counters, &reporter);

    let mut summary = RunSummary {
        total_files,
        processed_files: 0,
        error_count: 0,
        outputs_written: 0,
        elapsed_ms: 0,
    };
    let mut first_error = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(report)) => {
                summary.processed_files += report.processed;
                summary.error_count += report.errors;
                summary.outputs_written += report.outputs_written;
            }
            Ok(Err(error)) => {
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
            Err(join_error) => {
                if first_error.is_none() {
                    first_error = Some(AugmentError::task(join_error));
                }
            }
        }
    }

    // ワーカーの成否にかかわらずモニタを止める
    let _ = shutdown_tx.send(true);
    if let Some(monitor) = monitor {
        monitor.await.map_err(AugmentError::task)?;
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    summary.elapsed_ms = started.elapsed().as_millis() as u64;
    reporter.finished(&summary).await;
    Ok(summary)
}
