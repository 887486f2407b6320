use serde::{Deserialize, Serialize};

/// One URL whose verdict came back `Unreachable`, addressed by the cell
/// it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub cell: String,
    pub url: String,
    pub reason: String,
}

/// The sole durable output of one scan invocation.
///
/// Invariant: `broken_links.len() <= urls_checked <= urls_found`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub message: String,
    pub urls_checked: usize,
    pub urls_found: usize,
    pub broken_links: Vec<BrokenLink>,
}

impl ScanReport {
    pub fn new(urls_found: usize, urls_checked: usize, broken_links: Vec<BrokenLink>) -> Self {
        let message = summary_message(urls_found, broken_links.len());
        Self {
            message,
            urls_checked,
            urls_found,
            broken_links,
        }
    }

    pub fn all_working(&self) -> bool {
        self.broken_links.is_empty()
    }
}

pub fn summary_message(urls_found: usize, broken: usize) -> String {
    if broken == 0 {
        format!("All {} URLs are working correctly!", urls_found)
    } else {
        format!("Found {} broken link(s) out of {} URLs", broken, urls_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_message() {
        assert_eq!(summary_message(3, 0), "All 3 URLs are working correctly!");
        assert_eq!(summary_message(0, 0), "All 0 URLs are working correctly!");
    }

    #[test]
    fn test_broken_message() {
        assert_eq!(
            summary_message(2, 1),
            "Found 1 broken link(s) out of 2 URLs"
        );
    }

    #[test]
    fn test_report_serializes_with_wire_names() {
        let report = ScanReport::new(
            2,
            2,
            vec![BrokenLink {
                cell: "C3".to_string(),
                url: "https://example.com/".to_string(),
                reason: "HTTP 404".to_string(),
            }],
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["urlsFound"], 2);
        assert_eq!(json["urlsChecked"], 2);
        assert_eq!(json["brokenLinks"][0]["cell"], "C3");
        assert_eq!(json["brokenLinks"][0]["reason"], "HTTP 404");
        assert_eq!(json["message"], "Found 1 broken link(s) out of 2 URLs");
    }

    #[test]
    fn test_all_working_tracks_broken_list() {
        assert!(ScanReport::new(1, 1, vec![]).all_working());
        let broken = BrokenLink {
            cell: "A1".to_string(),
            url: "http://x/".to_string(),
            reason: "HTTP 500".to_string(),
        };
        assert!(!ScanReport::new(1, 1, vec![broken]).all_working());
    }
}
