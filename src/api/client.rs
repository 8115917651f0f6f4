//! HTTPクライアント
//!
//! 取得は1コマンドにつき逐次1回。リトライはしない。

use crate::config::Config;
use crate::error::{AdminError, Result};
use exam_admin_common::EventKind;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

pub struct ApiClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AdminError::Config(format!("APIのURLが不正です ({}): {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AdminError::Config(format!("APIのURLが不正です: {}", base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { base_url, token, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url(), config.token(), config.timeout_seconds)
    }

    /// 教室割当を取得: `GET {base}/{exams|concours}/{id}/assignments`
    pub async fn fetch_assignments(&self, kind: EventKind, id: &str) -> Result<Value> {
        self.get_json(&[kind.as_str(), id, "assignments"]).await
    }

    /// 一覧を取得: `GET {base}/{exams|concours}`
    pub async fn fetch_events(&self, kind: EventKind) -> Result<Value> {
        self.get_json(&[kind.as_str()]).await
    }

    /// パスセグメントはエンコードして連結する
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdminError::Config(format!("APIのURLが不正です: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");

        let mut request = self.http.get(url.clone()).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            });
            tracing::warn!(%url, status = status.as_u16(), %message, "API呼び出し失敗");
            return Err(AdminError::Api { status: status.as_u16(), message });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// エラーレスポンスの `message` / `error` を取り出す
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ApiClient::new("http://localhost:8000/api/", None, 5).unwrap();
        let url = client.endpoint(&["exams", "A 1/2", "assignments"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/exams/A%201%2F2/assignments");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(ApiClient::new("not a url", None, 5), Err(AdminError::Config(_))));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message":"Examen introuvable"}"#).as_deref(), Some("Examen introuvable"));
        assert_eq!(error_message(r#"{"error":"forbidden"}"#).as_deref(), Some("forbidden"));
        assert_eq!(error_message("<html>"), None);
    }
}
