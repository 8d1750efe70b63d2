// Augmentation engine - 1 ファイルを幅優先で展開する中核処理
// メモリには現在のフロンティアと構築中の次フロンティアだけを保持し、木全体は持たない

use crate::core::{AugmentError, AugmentResult, FileReport};
use crate::plan::JobPlan;
use crate::transform::ops;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// 展開中の 1 ノード
///
/// `origin_level` はこのノードを生んだジョブのレベル番号（元画像は 0）。
/// 子はこれより大きいレベルのジョブからしか作られないため、
/// 系譜のレベル番号は厳密に増加する。
#[derive(Debug)]
struct ResultNode {
    image: RgbImage,
    name: String,
    origin_level: usize,
}

/// 拡張エンジン
///
/// プランと縮小上限だけを持つ純粋な計算部。`Send + Sync` なので
/// ワーカー間では `Arc` で共有する。
#[derive(Debug)]
pub struct AugmentEngine {
    plan: JobPlan,
    resize_limit: u32,
}

impl AugmentEngine {
    pub fn new(plan: JobPlan, resize_limit: u32) -> Self {
        Self { plan, resize_limit }
    }

    pub fn plan(&self) -> &JobPlan {
        &self.plan
    }

    /// 1 ファイルを展開する
    ///
    /// `image_path` の画像を読み込み、長辺を `resize_limit` まで縮小し、
    /// 元ファイルを削除した上で、展開結果（元画像のコピーを含む）を
    /// `save_dir` に `<名前>.jpg` として書き出す。
    ///
    /// 読み込み失敗は元ファイルを残したまま中断する。保存失敗は
    /// そのファイルの処理を打ち切る。
    pub fn process_file(&self, image_path: &Path, save_dir: &Path) -> AugmentResult<FileReport> {
        let image = image::open(image_path)
            .map_err(|e| AugmentError::image_load(image_path.display().to_string(), e.into()))?
            .to_rgb8();

        let image = match ops::resize_to_limit(&image, self.resize_limit) {
            Some(resized) => resized,
            None => image,
        };

        // 出力ツリー上の複製を処理しているので、元ファイルはここで消してよい
        std::fs::remove_file(image_path)
            .map_err(|e| AugmentError::remove(image_path.display().to_string(), e.into()))?;

        let base_name = image_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        let mut report = FileReport {
            outputs_written: 0,
            rounds: 0,
            peak_frontier: 0,
        };
        let mut frontier = vec![ResultNode {
            image,
            name: base_name,
            origin_level: 0,
        }];

        while !frontier.is_empty() {
            report.rounds += 1;
            report.peak_frontier = report.peak_frontier.max(frontier.len());

            let mut next = Vec::new();
            for node in &frontier {
                let path = save_dir.join(format!("{}.jpg", node.name));
                node.image
                    .save_with_format(&path, ImageFormat::Jpeg)
                    .map_err(|e| AugmentError::image_save(path.display().to_string(), e.into()))?;
                report.outputs_written += 1;

                for (level, level_jobs) in self.plan.levels_after(node.origin_level) {
                    for job in &level_jobs.jobs {
                        for _ in 0..job.times {
                            next.push(ResultNode {
                                image: job.op.apply(&node.image),
                                name: format!("{}_{}", node.name, job.kind.tag()),
                                origin_level: level,
                            });
                        }
                    }
                }
            }
            // 前のフロンティアはここで破棄される
            frontier = next;
        }

        Ok(report)
    }
}
