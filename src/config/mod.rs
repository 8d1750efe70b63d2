// Configuration - JSON ジョブ設定の読み込みと検証
// フィールド名は既存ツールのワイヤ形式に合わせる（multi_process など）

use crate::core::{AugmentError, AugmentResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 拡張ジョブ設定
///
/// `job` は外側がレベル（適用順）、内側が同一レベルのジョブ列。
#[derive(Debug, Clone, Deserialize)]
pub struct AugmentConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// 長辺の上限ピクセル数（読み込み直後に縮小する）
    pub resize_limit: u32,
    /// ワーカー数。-1 は論理コア数を意味する
    #[serde(alias = "worker_count")]
    pub multi_process: i64,
    pub job: Vec<Vec<JobSpec>>,
}

/// ジョブ 1 件の生の指定
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    pub func: String,
    pub times: u32,
    #[serde(default)]
    pub w_p: Option<f32>,
    #[serde(default)]
    pub h_p: Option<f32>,
    #[serde(default)]
    pub min: Option<f32>,
    #[serde(default)]
    pub max: Option<f32>,
}

impl AugmentConfig {
    /// 設定ファイルを読み込んで検証する
    ///
    /// 解析・検証のどちらの失敗もディスクに触れる前の設定エラーとして返す。
    pub fn load(path: &Path) -> AugmentResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AugmentError::configuration(format!(
                "設定ファイルを読み込めません: {} - {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            AugmentError::configuration(format!(
                "設定ファイルの解析に失敗しました: {} - {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AugmentResult<()> {
        if self.resize_limit == 0 {
            return Err(AugmentError::configuration(
                "resize_limit は 1 以上である必要があります",
            ));
        }
        for level in &self.job {
            for spec in level {
                if spec.times == 0 {
                    return Err(AugmentError::configuration(format!(
                        "ジョブ '{}': times は 1 以上である必要があります",
                        spec.func
                    )));
                }
            }
        }
        Ok(())
    }

    /// ワーカー数を解決する
    pub fn resolved_workers(&self) -> AugmentResult<usize> {
        match self.multi_process {
            -1 => Ok(num_cpus::get()),
            n if n > 0 => Ok(n as usize),
            n => Err(AugmentError::worker_count(n)),
        }
    }
}
