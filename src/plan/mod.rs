// Job plan - 検証済み変換をレベル順に並べたもの
// 構築後は不変で、Arc 経由で全ワーカー・全ファイルから共有される

use crate::config::AugmentConfig;
use crate::core::{AugmentError, AugmentResult};
use crate::transform::{JobParams, TransformKind, TransformOp};

/// 検証済みジョブ 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub kind: TransformKind,
    pub op: TransformOp,
    pub times: u32,
}

/// 同一レベルに属するジョブ列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobLevel {
    pub jobs: Vec<Job>,
}

impl JobLevel {
    /// このレベルのファンアウト（times の合計）
    pub fn fanout(&self) -> u64 {
        self.jobs.iter().map(|job| u64::from(job.times)).sum()
    }
}

/// 実行順に並んだレベルの列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPlan {
    levels: Vec<JobLevel>,
}

impl JobPlan {
    /// 設定からプランを構築する
    ///
    /// 未知の `func` 記号や不正なパラメータは最初の 1 件で中断する。
    pub fn from_config(config: &AugmentConfig) -> AugmentResult<Self> {
        let mut levels = Vec::with_capacity(config.job.len());
        for specs in &config.job {
            let mut jobs = Vec::with_capacity(specs.len());
            for spec in specs {
                let kind = TransformKind::from_tag(&spec.func).ok_or_else(|| {
                    AugmentError::configuration(format!("不明なジョブ種別です: '{}'", spec.func))
                })?;
                let params = JobParams {
                    w_p: spec.w_p,
                    h_p: spec.h_p,
                    min: spec.min,
                    max: spec.max,
                };
                let op = TransformOp::build(kind, params)?;
                jobs.push(Job {
                    kind,
                    op,
                    times: spec.times,
                });
            }
            levels.push(JobLevel { jobs });
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// レベル番号（1 始まり）付きで全レベルを走査する
    pub fn levels(&self) -> impl Iterator<Item = (usize, &JobLevel)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, level)| (i + 1, level))
    }

    /// `origin_level` より後のレベルだけを走査する
    ///
    /// 展開はレベル番号が厳密に増加する方向にしか進まない。
    pub fn levels_after(&self, origin_level: usize) -> impl Iterator<Item = (usize, &JobLevel)> {
        self.levels().skip(origin_level)
    }

    /// 入力 1 ファイルあたりの出力枚数（元画像のコピーを含む）
    ///
    /// 各レベルは親 1 枚につき「そのまま残す 1 枚 + ファンアウト枚」を
    /// 生むので、総数は (1 + fanout) の総積になる。
    pub fn outputs_per_file(&self) -> u64 {
        self.levels
            .iter()
            .fold(1u64, |acc, level| acc.saturating_mul(1 + level.fanout()))
    }
}
