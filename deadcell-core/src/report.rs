// Report rendering for completed scans

use deadcell_scanner::ScanReport;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Render a report in the requested format.
pub fn generate_report(
    report: &ScanReport,
    format: &ReportFormat,
    source: &str,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report, source)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Csv => Ok(generate_csv_report(report)),
        ReportFormat::Markdown => Ok(generate_markdown_report(report, source)),
    }
}

pub fn generate_text_report(report: &ScanReport, source: &str) -> String {
    let mut out = String::new();

    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str("                         DEADCELL LINK SCAN REPORT\n");
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    out.push_str(&format!("Source:        {}\n", source));
    out.push_str(&format!(
        "Scan Date:     {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("URLs Found:    {}\n", report.urls_found));
    out.push_str(&format!("URLs Checked:  {}\n", report.urls_checked));
    out.push_str(&format!("Broken Links:  {}\n", report.broken_links.len()));

    let hosts = affected_hosts(report);
    if hosts > 0 {
        out.push_str(&format!("Dead Hosts:    {}\n", hosts));
    }
    out.push('\n');

    if report.broken_links.is_empty() {
        out.push_str(&format!("\x1b[32m✓ {}\x1b[0m\n", report.message));
    } else {
        out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        out.push_str("BROKEN LINKS\n");
        out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        for link in &report.broken_links {
            out.push_str(&format!(
                "  ✗ {:<6} {}{}{}  {}\n",
                link.cell,
                reason_color(&link.reason),
                link.reason,
                "\x1b[0m",
                link.url
            ));
        }

        out.push('\n');
        out.push_str(&format!("\x1b[31m{}\x1b[0m\n", report.message));
    }

    out
}

pub fn generate_json_report(report: &ScanReport) -> Result<String, serde_json::Error> {
    // The wire shape consumed by result presenters; key names are a
    // compatibility contract, do not rename.
    let json_report = serde_json::json!({
        "status": "success",
        "message": report.message,
        "urlsChecked": report.urls_checked,
        "urlsFound": report.urls_found,
        "brokenLinks": report.broken_links,
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(report: &ScanReport) -> String {
    let mut out = String::from("cell,url,reason\n");
    for link in &report.broken_links {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&link.cell),
            csv_escape(&link.url),
            csv_escape(&link.reason)
        ));
    }
    out
}

pub fn generate_markdown_report(report: &ScanReport, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Link scan report for {}\n\n", source));
    out.push_str(&format!("{}\n\n", report.message));
    out.push_str(&format!(
        "- URLs found: {}\n- URLs checked: {}\n\n",
        report.urls_found, report.urls_checked
    ));

    if !report.broken_links.is_empty() {
        out.push_str("| Cell | Reason | URL |\n");
        out.push_str("|------|--------|-----|\n");
        for link in &report.broken_links {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                link.cell, link.reason, link.url
            ));
        }
    }

    out
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Distinct hosts among the broken URLs. One dead host often explains a
/// whole column of broken links.
fn affected_hosts(report: &ScanReport) -> usize {
    report
        .broken_links
        .iter()
        .filter_map(|link| Url::parse(&link.url).ok())
        .filter_map(|url| url.host_str().map(str::to_string))
        .collect::<HashSet<_>>()
        .len()
}

fn reason_color(reason: &str) -> &'static str {
    if reason.starts_with("HTTP 4") {
        "\x1b[33m" // yellow
    } else {
        "\x1b[31m" // red
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
