// Worker - バケット担当ワーカーの起動
// CPU負荷の高い展開は blocking プールへ逃がし、進捗は自分のスロットだけに書く

use crate::core::{AugmentError, AugmentResult, WorkItem, WorkerReport};
use crate::engine::AugmentEngine;
use crate::monitor::ProgressCounters;
use crate::reporting::RunReporter;
use std::sync::Arc;

/// 単一ワーカー
///
/// 担当バケットのファイルを順に処理する。ファイル単位の失敗は
/// 通知してスキップし、成否を問わず担当スロットを進める。
/// モニタの終了条件（カウンタ合計 = 総ファイル数）はこれで保たれる。
pub fn spawn_single_worker(
    slot: usize,
    engine: Arc<AugmentEngine>,
    bucket: Vec<WorkItem>,
    counters: ProgressCounters,
    reporter: Arc<dyn RunReporter>,
) -> tokio::task::JoinHandle<AugmentResult<WorkerReport>> {
    tokio::spawn(async move {
        let mut report = WorkerReport::default();

        for item in bucket {
            // 1ファイル分の展開をblockingプールで実行
            let engine = Arc::clone(&engine);
            let source = item.source.clone();
            let save_dir = item.save_dir.clone();
            let result =
                tokio::task::spawn_blocking(move || engine.process_file(&source, &save_dir)).await;

            match result {
                Ok(Ok(file_report)) => {
                    report.processed += 1;
                    report.outputs_written += file_report.outputs_written;
                }
                Ok(Err(error)) if error.is_recoverable() => {
                    report.errors += 1;
                    reporter.file_error(&item.source, &error.to_string()).await;
                }
                Ok(Err(error)) => return Err(error),
                Err(join_error) => {
                    // 変換中のパニックもファイル単位の失敗として扱う
                    report.errors += 1;
                    let error = AugmentError::task(join_error);
                    reporter.file_error(&item.source, &error.to_string()).await;
                }
            }

            counters.increment(slot);
        }

        Ok(report)
    })
}

/// ワーカープール: バケットごとに 1 タスク起動する
pub fn spawn_workers(
    engine: Arc<AugmentEngine>,
    partition: Vec<Vec<WorkItem>>,
    counters: &ProgressCounters,
    reporter: &Arc<dyn RunReporter>,
) -> Vec<tokio::task::JoinHandle<AugmentResult<WorkerReport>>> {
    partition
        .into_iter()
        .enumerate()
        .map(|(slot, bucket)| {
            spawn_single_worker(
                slot,
                Arc::clone(&engine),
                bucket,
                counters.clone(),
                Arc::clone(reporter),
            )
        })
        .collect()
}
