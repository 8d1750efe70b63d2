// Run reporting - 実行イベントの通知先を抽象化
// コンソール実装と、テスト・ライブラリ利用向けの無音実装を提供

use crate::core::RunSummary;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

/// 実行イベントの通知先
#[automock]
#[async_trait]
pub trait RunReporter: Send + Sync {
    /// フェーズの開始を通知する
    async fn phase(&self, message: &str);

    /// ファイル単位のエラーを通知する（実行は続行される）
    async fn file_error(&self, file_path: &Path, error: &str);

    /// 実行全体の完了を通知する
    async fn finished(&self, summary: &RunSummary);
}

/// コンソールへの通知実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunReporter for ConsoleReporter {
    async fn phase(&self, message: &str) {
        println!("  > {message}");
    }

    async fn file_error(&self, file_path: &Path, error: &str) {
        eprintln!("  > error {}: {error}", file_path.display());
    }

    async fn finished(&self, summary: &RunSummary) {
        println!("  > finish");
        println!(
            "  > processed {}/{} files | errors {} | outputs {} | {:.1}s",
            summary.processed_files,
            summary.total_files,
            summary.error_count,
            summary.outputs_written,
            summary.elapsed_ms as f64 / 1000.0
        );
    }
}

/// 何もしない通知実装（テスト・ライブラリ利用向け）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunReporter for NoOpReporter {
    async fn phase(&self, _message: &str) {
        // 何もしない
    }

    async fn file_error(&self, _file_path: &Path, _error: &str) {
        // 何もしない
    }

    async fn finished(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
