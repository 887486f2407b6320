use clap::ArgMatches;
use colored::Colorize;
use deadcell_core::report::{ReportFormat, generate_report, save_report};
use deadcell_core::{ScanOptions, execute_scan, load_grid};
use deadcell_scanner::{Cell, cell_address, classify};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber;

/// Expand `~` and turn a raw CLI path argument into a `PathBuf`.
pub fn resolve_input_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    PathBuf::from(expanded.as_ref())
}

/// URL candidates of a grid as `(address, url)` pairs in row-major order.
pub fn list_candidates(cells: &[Cell]) -> Vec<(String, String)> {
    let mut ordered: Vec<&Cell> = cells.iter().collect();
    ordered.sort_by_key(|cell| (cell.row, cell.col));
    ordered
        .into_iter()
        .filter_map(classify)
        .map(|candidate| {
            (
                cell_address(candidate.row, candidate.col),
                candidate.url,
            )
        })
        .collect()
}

pub async fn handle_check(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let file = sub_matches.get_one::<String>("file").unwrap();
    let sheet = sub_matches.get_one::<String>("sheet").cloned();
    let threads = *sub_matches.get_one::<usize>("threads").unwrap_or(&8);
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&5);
    let format_arg = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = sub_matches.get_one::<PathBuf>("output");

    // clap already restricted the value, so the fallback never fires
    let format = ReportFormat::from_str(format_arg).unwrap_or(ReportFormat::Text);

    let path = resolve_input_path(file);
    if !path.exists() {
        eprintln!("✗ File not found: {}", path.display());
        std::process::exit(1);
    }

    println!("\n🔗 Checking links in {}", path.display());
    if let Some(ref sheet) = sheet {
        println!("Sheet: {}", sheet);
    }
    println!("Workers: {}", threads);
    println!("Timeout: {}s per request\n", timeout_secs);

    let options = ScanOptions {
        path: path.clone(),
        sheet,
        timeout: Duration::from_secs(timeout_secs),
        concurrency: threads,
        show_progress: true,
    };

    let progress_callback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let report = match execute_scan(options, Some(progress_callback)).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("✗ Scan failed: {}", e);
            std::process::exit(1);
        }
    };

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let rendered = match generate_report(&report, &format, &source) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("✗ Failed to render report: {}", e);
            std::process::exit(1);
        }
    };

    match output {
        Some(out_path) => {
            if let Err(e) = save_report(&rendered, out_path) {
                eprintln!("✗ Failed to save report: {}", e);
                std::process::exit(1);
            }
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                out_path.display().to_string().bright_white()
            );
            if report.all_working() {
                println!("{}", report.message.green());
            } else {
                println!("{}", report.message.red());
            }
        }
        None => {
            println!();
            print!("{}", rendered);
        }
    }
}

pub fn handle_list(sub_matches: &ArgMatches) {
    let file = sub_matches.get_one::<String>("file").unwrap();
    let sheet = sub_matches.get_one::<String>("sheet").cloned();

    let path = resolve_input_path(file);
    let grid = match load_grid(&path, sheet.as_deref()) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let candidates = list_candidates(grid.cells());
    if candidates.is_empty() {
        println!("No URLs found in sheet '{}'", grid.sheet_name());
        return;
    }

    println!(
        "Found {} URL(s) in sheet '{}':\n",
        candidates.len(),
        grid.sheet_name()
    );
    for (address, url) in candidates {
        println!("  {} {}", format!("{:<6}", address).cyan(), url);
    }
}
