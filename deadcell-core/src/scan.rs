use crate::workbook::load_grid;
use deadcell_scanner::{ScanReport, Scanner};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Options for one scan run over one workbook.
pub struct ScanOptions {
    pub path: PathBuf,
    pub sheet: Option<String>,
    pub timeout: Duration,
    pub concurrency: usize,
    pub show_progress: bool,
}

/// Callback for host-level status lines during a scan.
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Load a workbook and run the link scan over its grid.
///
/// Returns the completed report, or a display-ready message for structural
/// input problems (unreadable workbook, empty sheet, empty grid).
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<ScanReport, String> {
    let ScanOptions {
        path,
        sheet,
        timeout,
        concurrency,
        show_progress,
    } = options;

    let grid = load_grid(&path, sheet.as_deref()).map_err(|e| e.to_string())?;
    let (rows, cols) = grid.dimensions();
    info!(
        "Loaded sheet '{}' from {} ({} rows x {} cols, {} occupied cells)",
        grid.sheet_name(),
        path.display(),
        rows,
        cols,
        grid.cells().len()
    );

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Scanning sheet '{}' ({} occupied cells)",
            grid.sheet_name(),
            grid.cells().len()
        ));
    }

    // Single spinner; each completed probe updates it through the
    // scanner's progress callback.
    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Checking URLs...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut scanner = Scanner::new()
        .with_timeout(timeout)
        .with_concurrency(concurrency);

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        scanner = scanner.with_progress_callback(Arc::new(move |checked, url| {
            pb_clone.set_message(format!("Checking URLs... {} done (last: {})", checked, url));
            pb_clone.tick();
        }));
    }

    let report = scanner
        .scan(grid.cells())
        .await
        .map_err(|e| e.to_string())?;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Checked {} URLs", report.urls_checked));
    }

    Ok(report)
}
