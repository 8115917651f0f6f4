use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("API呼び出しエラー ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Common(#[from] exam_admin_common::Error),
}

pub type Result<T> = std::result::Result<T, AdminError>;
