// Tests for scan execution glue

use deadcell_core::{ScanOptions, execute_scan};
use std::time::Duration;

fn options_for(path: std::path::PathBuf) -> ScanOptions {
    ScanOptions {
        path,
        sheet: None,
        timeout: Duration::from_millis(500),
        concurrency: 4,
        show_progress: false,
    }
}

#[tokio::test]
async fn test_missing_workbook_is_rejected_before_scanning() {
    let err = execute_scan(options_for("/definitely/not/here.xlsx".into()), None)
        .await
        .unwrap_err();
    assert!(err.contains("failed to open workbook"), "got: {}", err);
}

#[tokio::test]
async fn test_unreadable_workbook_is_rejected_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.xlsx");
    std::fs::write(&path, b"not a spreadsheet").unwrap();

    let err = execute_scan(options_for(path), None).await.unwrap_err();
    assert!(err.contains("failed to open workbook"), "got: {}", err);
}
