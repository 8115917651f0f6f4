//! リモートAPI連携

mod client;

pub use client::ApiClient;

use crate::cli::Source;
use crate::error::{AdminError, Result};
use exam_admin_common::{normalize_assignments, AssignmentSummary};

/// 取得元に応じて割当を読み込み、正規化する
pub async fn load_assignments(client: &ApiClient, source: &Source) -> Result<AssignmentSummary> {
    let body = match source {
        Source::Remote { kind, id } => client.fetch_assignments(*kind, id).await?,
        Source::File(path) => read_json_file(path)?,
    };
    Ok(normalize_assignments(&body)?)
}

/// 保存済みのAPIレスポンスを読む
pub fn read_json_file(path: &std::path::Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Err(AdminError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
