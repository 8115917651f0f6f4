//! 設定ファイルの読み書きテスト

use exam_admin::config::Config;
use exam_admin::error::AdminError;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.api_base_url, "http://localhost:8000/api");
    assert!(config.api_token.is_none());
    assert_eq!(config.page_size, 10);
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("exam-admin").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://scolarite.example.ma/api".to_string()).unwrap();
    config.set_token("abc".to_string());
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api_base_url, "https://scolarite.example.ma/api");
    assert_eq!(loaded.api_token.as_deref(), Some("abc"));
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"page_size": 25}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.page_size, 25);
    assert_eq!(config.timeout_seconds, 30);
}

#[test]
fn test_invalid_base_url_rejected() {
    let mut config = Config::default();
    let result = config.set_base_url("ftp://example".to_string());
    assert!(matches!(result, Err(AdminError::Config(_))));
}

#[test]
fn test_broken_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{").unwrap();

    assert!(matches!(Config::load_from(&path), Err(AdminError::JsonParse(_))));
}
