//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use exam_admin::api;
use exam_admin::error::AdminError;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読んだ場合
#[test]
fn test_read_nonexistent_file() {
    let result = api::read_json_file(Path::new("/nonexistent/path/12345.json"));
    assert!(matches!(result, Err(AdminError::FileNotFound(_))));
}

/// JSONでないファイルを読んだ場合
#[test]
fn test_read_invalid_json_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("response.json");
    std::fs::write(&path, "<html>502 Bad Gateway</html>").unwrap();

    let result = api::read_json_file(&path);
    assert!(matches!(result, Err(AdminError::JsonParse(_))));
}

/// AdminErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AdminError::Config("テスト設定エラー".to_string()),
        AdminError::FileNotFound("assignments.json".to_string()),
        AdminError::Api { status: 404, message: "Examen introuvable".to_string() },
        AdminError::ExcelGeneration("Excel生成エラー".to_string()),
        AdminError::InvalidInput("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// APIエラーはステータスとメッセージを含む
#[test]
fn test_api_error_message() {
    let err = AdminError::Api { status: 500, message: "Erreur serveur".to_string() };
    let display = format!("{}", err);

    assert!(display.contains("500"));
    assert!(display.contains("Erreur serveur"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AdminError = io_err.into();

    assert!(matches!(err, AdminError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = exam_admin_common::Error::UnexpectedFormat("status: error".to_string());
    let err: AdminError = common_err.into();

    assert!(matches!(err, AdminError::Common(_)));
    assert_eq!(format!("{}", err), "Unexpected format: status: error");
}
