use crate::cell::Cell;

/// A cell value recognized as an HTTP(S) URL, still carrying the
/// coordinates it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCandidate {
    pub row: usize,
    pub col: usize,
    pub url: String,
}

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether a raw cell value looks like an HTTP(S) URL.
///
/// Deliberately permissive: only the scheme prefix is checked, anchored at
/// the start of the trimmed value. A candidate with a malformed remainder
/// is still a candidate; the probe reports what is wrong with it.
pub fn is_url_like(value: &str) -> bool {
    let trimmed = value.trim().as_bytes();
    SCHEMES.iter().any(|scheme| {
        trimmed.len() >= scheme.len() && trimmed[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
    })
}

/// Classify a single cell, yielding a candidate when its trimmed value
/// carries an HTTP(S) scheme prefix. Empty values yield `None`.
pub fn classify(cell: &Cell) -> Option<UrlCandidate> {
    let trimmed = cell.value.trim();
    if is_url_like(trimmed) {
        Some(UrlCandidate {
            row: cell.row,
            col: cell.col,
            url: trimmed.to_string(),
        })
    } else {
        None
    }
}
