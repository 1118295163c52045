//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use luminaire_xref::error::XrefError;
use luminaire_xref::{ingest, store};
use std::path::Path;
use tempfile::tempdir;
use xref_common::{Catalog, RawTable};

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_parse_nonexistent_file() {
    let result = ingest::parse_table(Path::new("/nonexistent/path/schedule.csv"));
    assert!(matches!(result, Err(XrefError::FileNotFound(_))));
}

/// 空のファイル
#[test]
fn test_parse_empty_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let err = ingest::parse_table(&path).unwrap_err();
    assert!(matches!(err, XrefError::Common(xref_common::Error::Parse(_))));
}

/// 壊れたスプレッドシート
#[test]
fn test_parse_corrupt_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"PK\x03\x04 not really a zip").unwrap();

    let err = ingest::parse_table(&path).unwrap_err();
    assert!(matches!(err, XrefError::Common(xref_common::Error::Parse(_))));
}

/// 不正なプロジェクトJSON
#[test]
fn test_load_invalid_project_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("project.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = store::load_project(&path).unwrap_err();
    assert!(matches!(err, XrefError::JsonParse(_)));
}

/// メーカー列のないカタログ
#[test]
fn test_catalog_without_manufacturers() {
    let grid = vec![
        vec!["model_number".to_string(), "lumens".to_string()],
        vec!["LDN6".to_string(), "2000".to_string()],
    ];
    let table = RawTable::from_grid(grid).unwrap();

    let err = Catalog::default().import_products(&table).unwrap_err();
    assert!(err.to_string().contains("No manufacturer names found"));
}

/// XrefErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        XrefError::Config("テスト設定エラー".to_string()),
        XrefError::FileNotFound("schedule.csv".to_string()),
        XrefError::ExcelGeneration("Excel生成エラー".to_string()),
        XrefError::Prompt("中断".to_string()),
        XrefError::Mapping("lumens".to_string()),
        XrefError::Common(xref_common::Error::Workflow("item 3 not found".to_string())),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 共通ライブラリのエラーはそのまま表示される
#[test]
fn test_common_error_is_transparent() {
    let inner = xref_common::Error::Parse("table has no rows".to_string());
    let expected = inner.to_string();
    let err: XrefError = inner.into();
    assert_eq!(err.to_string(), expected);
}
