pub mod cli;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod engine;
pub mod monitor;
pub mod plan;
pub mod reporting;
pub mod transform;

use std::path::Path;
use std::sync::Arc;

pub use crate::config::AugmentConfig;
pub use crate::core::{AugmentError, AugmentResult, RunSummary};
pub use crate::dispatch::RunOptions;
pub use crate::engine::AugmentEngine;
pub use crate::plan::JobPlan;
pub use crate::reporting::{ConsoleReporter, NoOpReporter, RunReporter};

/// 設定ファイルを読み込んで増幅パイプライン全体を実行する
///
/// 設定の読み込みから出力ツリーの生成までを1回の呼び出しにまとめた
/// 高レベルAPI。CLIと統合テストの両方から利用する。
pub async fn run_from_config_path(
    config_path: &Path,
    reporter: Arc<dyn RunReporter>,
    options: RunOptions,
) -> AugmentResult<RunSummary> {
    reporter.phase("load config").await;
    let config = AugmentConfig::load(config_path)?;
    dispatch::run(&config, reporter, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, input: &Path, output: &Path) -> std::path::PathBuf {
        let config_path = dir.path().join("config.json");
        let config_text = format!(
            r#"{{
                "input_path": "{}",
                "output_path": "{}",
                "resize_limit": 1024,
                "multi_process": 2,
                "job": [
                    [ {{ "func": "h", "times": 1 }} ],
                    [ {{ "func": "g", "times": 1 }} ]
                ]
            }}"#,
            input.display(),
            output.display()
        );
        std::fs::write(&config_path, config_text).unwrap();
        config_path
    }

    #[tokio::test]
    async fn test_run_from_config_path_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        let image = RgbImage::from_pixel(16, 16, Rgb([120, 80, 40]));
        image
            .save_with_format(input.join("a.jpg"), ImageFormat::Jpeg)
            .unwrap();

        let output = dir.path().join("out");
        let config_path = write_config(&dir, &input, &output);

        let summary = run_from_config_path(
            &config_path,
            Arc::new(NoOpReporter::new()),
            RunOptions::default(),
        )
        .await
        .unwrap();

        // (1+1) * (1+1) = 4 ファイルが生成される
        assert_eq!(summary.total_files, 1);
        assert_eq!(summary.processed_files, 1);
        assert_eq!(summary.error_count, 0);
        assert_eq!(summary.outputs_written, 4);
        assert!(output.join("a.jpg").exists());
        assert!(output.join("a_h.jpg").exists());
        assert!(output.join("a_g.jpg").exists());
        assert!(output.join("a_h_g.jpg").exists());
    }

    #[tokio::test]
    async fn test_run_from_config_path_missing_config() {
        let result = run_from_config_path(
            Path::new("no_such_config.json"),
            Arc::new(NoOpReporter::new()),
            RunOptions::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(AugmentError::ConfigurationError { .. })
        ));
    }
}
