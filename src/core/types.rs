// 拡張処理に関連するデータ型定義

use std::path::PathBuf;

/// 1ファイル分の処理単位
///
/// `source` は出力ツリー側へ複製済みの画像パス、`save_dir` は
/// 生成された画像を書き出すディレクトリ（= `source` の親）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub source: PathBuf,
    pub save_dir: PathBuf,
}

/// 1ファイルの展開結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    /// 書き出した画像の枚数（元画像のコピーを含む）
    pub outputs_written: u64,
    /// フロンティアを入れ替えたラウンド数
    pub rounds: usize,
    /// 1 ラウンドのフロンティアの最大ノード数
    pub peak_frontier: usize,
}

/// 1ワーカー分の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub processed: usize,
    pub errors: usize,
    pub outputs_written: u64,
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_files: usize,
    pub processed_files: usize,
    pub error_count: usize,
    pub outputs_written: u64,
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_report_creation() {
        let report = FileReport {
            outputs_written: 12,
            rounds: 3,
            peak_frontier: 6,
        };

        assert_eq!(report.outputs_written, 12);
        assert_eq!(report.rounds, 3);
        assert_eq!(report.peak_frontier, 6);
    }

    #[test]
    fn test_worker_report_default() {
        let report = WorkerReport::default();

        assert_eq!(report.processed, 0);
        assert_eq!(report.errors, 0);
        assert_eq!(report.outputs_written, 0);
    }

    #[test]
    fn test_run_summary_creation() {
        let summary = RunSummary {
            total_files: 100,
            processed_files: 95,
            error_count: 5,
            outputs_written: 1140,
            elapsed_ms: 30000,
        };

        assert_eq!(summary.total_files, 100);
        assert_eq!(summary.processed_files, 95);
        assert_eq!(summary.error_count, 5);
        assert_eq!(summary.outputs_written, 1140);
        assert_eq!(summary.elapsed_ms, 30000);
    }

    #[test]
    fn test_work_item_equality() {
        let a = WorkItem {
            source: PathBuf::from("/out/dog/a.jpg"),
            save_dir: PathBuf::from("/out/dog"),
        };
        let b = a.clone();

        assert_eq!(a, b);
    }
}
