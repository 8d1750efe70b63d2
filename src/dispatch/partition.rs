// Work partitioning - 出力ツリーの走査と静的ラウンドロビン分配

use crate::core::{AugmentError, AugmentResult, WorkItem};
use std::path::Path;
use walkdir::WalkDir;

/// 出力ツリーを走査し、ファイルを walk 順で `workers` 個のバケットへ
/// ラウンドロビン分配する
///
/// どのファイルもちょうど 1 つのバケットに属し、バケットの大きさの
/// 差は高々 1。分配は実行前に確定し、実行中の再割り当てはない。
/// 拡張子によるフィルタはせず、画像でないファイルは処理時に
/// ファイル単位のエラーとして表面化する。
pub fn build_partition(root: &Path, workers: usize) -> AugmentResult<Vec<Vec<WorkItem>>> {
    let mut buckets = vec![Vec::new(); workers];
    let mut index = 0usize;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| AugmentError::scan(root.display().to_string(), e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.path().to_path_buf();
        let save_dir = source.parent().unwrap_or(root).to_path_buf();
        buckets[index % workers].push(WorkItem { source, save_dir });
        index += 1;
    }

    Ok(buckets)
}
