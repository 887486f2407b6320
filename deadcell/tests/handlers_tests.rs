use deadcell::handlers::*;
use deadcell_scanner::Cell;
use std::path::PathBuf;

#[test]
fn test_resolve_input_path_plain() {
    let resolved = resolve_input_path("data/links.xlsx");
    assert_eq!(resolved, PathBuf::from("data/links.xlsx"));
}

#[test]
fn test_resolve_input_path_absolute() {
    let resolved = resolve_input_path("/tmp/links.xlsx");
    assert_eq!(resolved, PathBuf::from("/tmp/links.xlsx"));
}

#[test]
fn test_resolve_input_path_expands_tilde() {
    if let Ok(home) = std::env::var("HOME") {
        let resolved = resolve_input_path("~/links.xlsx");
        assert_eq!(resolved, PathBuf::from(format!("{}/links.xlsx", home)));
    }
}

#[test]
fn test_list_candidates_filters_and_orders() {
    let cells = vec![
        Cell::new(2, 0, "https://late.example/"),
        Cell::new(0, 1, "not a url"),
        Cell::new(0, 0, "  http://early.example/  "),
        Cell::new(1, 3, "42"),
        Cell::new(1, 2, "HTTPS://mid.example/"),
    ];

    let candidates = list_candidates(&cells);

    assert_eq!(
        candidates,
        vec![
            ("A1".to_string(), "http://early.example/".to_string()),
            ("C2".to_string(), "HTTPS://mid.example/".to_string()),
            ("A3".to_string(), "https://late.example/".to_string()),
        ]
    );
}

#[test]
fn test_list_candidates_empty_grid() {
    assert!(list_candidates(&[]).is_empty());
}
