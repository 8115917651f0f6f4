//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// APIレスポンスの最上位構造が契約と異なる
    #[error("Unexpected format: {0}")]
    UnexpectedFormat(String),

    /// QRスキャンデータが読み取れない
    #[error("Scan error: {0}")]
    Scan(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
