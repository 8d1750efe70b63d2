// Input mirroring - 入力ツリーを出力先へ複製する
// 破壊的な展開は複製側だけに行うので、元データは変更されない

use crate::core::{AugmentError, AugmentResult};
use std::path::Path;
use walkdir::WalkDir;

/// 入力を出力先へ複製する
///
/// 出力パスが既に存在する場合は失敗する。入力がファイルなら
/// 出力ディレクトリを作ってその中へコピーし、ディレクトリなら
/// サブディレクトリを含めて再帰的に複製する。
pub fn mirror_input(input: &Path, output: &Path) -> AugmentResult<()> {
    if output.exists() {
        return Err(AugmentError::output_path(output.display().to_string()));
    }

    if input.is_file() {
        std::fs::create_dir_all(output)
            .map_err(|e| AugmentError::mirror(output.display().to_string(), e.into()))?;
        let file_name = input.file_name().ok_or_else(|| {
            AugmentError::mirror(
                input.display().to_string(),
                anyhow::anyhow!("ファイル名を取得できません"),
            )
        })?;
        std::fs::copy(input, output.join(file_name))
            .map_err(|e| AugmentError::mirror(input.display().to_string(), e.into()))?;
        return Ok(());
    }

    if !input.is_dir() {
        return Err(AugmentError::input_path(input.display().to_string()));
    }

    for entry in WalkDir::new(input) {
        let entry =
            entry.map_err(|e| AugmentError::mirror(input.display().to_string(), e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(input)
            .map_err(|e| AugmentError::mirror(entry.path().display().to_string(), e.into()))?;
        let target = output.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| AugmentError::mirror(target.display().to_string(), e.into()))?;
        } else {
            std::fs::copy(entry.path(), &target)
                .map_err(|e| AugmentError::mirror(target.display().to_string(), e.into()))?;
        }
    }

    Ok(())
}
