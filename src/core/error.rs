// Error types for the augmentation pipeline
// 拡張パイプライン共通のエラー型定義

use thiserror::Error;

/// 拡張処理固有のエラー型
#[derive(Error, Debug)]
pub enum AugmentError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("入力パスエラー: {path} はファイルでもディレクトリでもありません")]
    InputPathError { path: String },

    #[error("出力パスエラー: {path} は既に存在します")]
    OutputPathError { path: String },

    #[error("ワーカー数エラー: {value} は無効です (-1 または 1 以上を指定してください)")]
    WorkerCountError { value: i64 },

    #[error("複製エラー: {path} - {source}")]
    MirrorError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("ファイル走査エラー: {path} - {source}")]
    ScanError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("画像読み込みエラー: {file_path} - {source}")]
    ImageLoadError {
        file_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("画像保存エラー: {file_path} - {source}")]
    ImageSaveError {
        file_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("元ファイル削除エラー: {file_path} - {source}")]
    RemoveError {
        file_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl AugmentError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 入力パスエラーの作成
    pub fn input_path(path: impl Into<String>) -> Self {
        Self::InputPathError { path: path.into() }
    }

    /// 出力パスエラーの作成
    pub fn output_path(path: impl Into<String>) -> Self {
        Self::OutputPathError { path: path.into() }
    }

    /// ワーカー数エラーの作成
    pub fn worker_count(value: i64) -> Self {
        Self::WorkerCountError { value }
    }

    /// 複製エラーの作成
    pub fn mirror(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::MirrorError {
            path: path.into(),
            source,
        }
    }

    /// ファイル走査エラーの作成
    pub fn scan(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ScanError {
            path: path.into(),
            source,
        }
    }

    /// 画像読み込みエラーの作成
    pub fn image_load(file_path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ImageLoadError {
            file_path: file_path.into(),
            source,
        }
    }

    /// 画像保存エラーの作成
    pub fn image_save(file_path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ImageSaveError {
            file_path: file_path.into(),
            source,
        }
    }

    /// 元ファイル削除エラーの作成
    pub fn remove(file_path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::RemoveError {
            file_path: file_path.into(),
            source,
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// エラーが回復可能（ファイル単位でスキップして続行できる）かどうかを判定
    ///
    /// 設定・パス・ワーカー数のエラーは実行開始前に全体を中断する。
    /// 個々の画像の読み込み/保存/削除の失敗はそのファイルだけを
    /// スキップして処理を続行できる。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigurationError { .. } => false,
            Self::InputPathError { .. } => false,
            Self::OutputPathError { .. } => false,
            Self::WorkerCountError { .. } => false,
            Self::MirrorError { .. } => false,
            Self::ScanError { .. } => false,
            Self::ImageLoadError { .. } => true,
            Self::ImageSaveError { .. } => true,
            Self::RemoveError { .. } => true,
            Self::TaskError { .. } => true,
            Self::InternalError { .. } => false,
        }
    }
}

/// 拡張処理の結果型
pub type AugmentResult<T> = std::result::Result<T, AugmentError>;

// From実装を個別に追加
impl From<anyhow::Error> for AugmentError {
    fn from(error: anyhow::Error) -> Self {
        AugmentError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for AugmentError {
    fn from(error: tokio::task::JoinError) -> Self {
        AugmentError::TaskError { source: error }
    }
}
