use crate::cell::{Cell, cell_address};
use crate::classify::{UrlCandidate, classify};
use crate::error::{Result, ScanError};
use crate::probe::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, ProbeVerdict, Prober};
use crate::result::{BrokenLink, ScanReport};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fires once per completed probe with the running checked count and the
/// URL that was just probed.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Walks a cell grid, classifies values as URL candidates, probes each
/// candidate and folds the verdicts into a [`ScanReport`].
///
/// Probes run with bounded concurrency; a concurrency of 1 reproduces the
/// strictly sequential baseline. The report is row-major regardless of
/// completion order. Each `scan` call is a self-contained pass with no
/// state carried across invocations.
pub struct Scanner {
    timeout: Duration,
    max_redirects: usize,
    concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            concurrency: DEFAULT_CONCURRENCY,
            progress_callback: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Scan a sequence of occupied cells.
    ///
    /// An empty sequence is a structural input error. Everything else
    /// completes with a report: per-URL failures are folded into verdicts,
    /// never raised.
    pub async fn scan(&self, cells: &[Cell]) -> Result<ScanReport> {
        if cells.is_empty() {
            return Err(ScanError::EmptyGrid);
        }

        // Row-major order is an output contract; enforce it on the way in
        // so candidate discovery order is reproducible too.
        let mut ordered: Vec<&Cell> = cells.iter().collect();
        ordered.sort_by_key(|cell| (cell.row, cell.col));

        let candidates: Vec<UrlCandidate> =
            ordered.into_iter().filter_map(classify).collect();
        let urls_found = candidates.len();
        info!(
            "Found {} URL candidate(s) in {} occupied cell(s)",
            urls_found,
            cells.len()
        );

        let prober = Prober::with_config(self.timeout, self.max_redirects);
        let prober = &prober;
        let progress = self.progress_callback.as_ref();
        let checked_counter = AtomicUsize::new(0);
        let checked_counter = &checked_counter;

        let mut results: Vec<(UrlCandidate, ProbeVerdict)> = stream::iter(candidates)
            .map(move |candidate| async move {
                debug!(
                    "Probing {} (cell {})",
                    candidate.url,
                    cell_address(candidate.row, candidate.col)
                );
                let verdict = prober.probe(&candidate.url).await;
                if let Some(callback) = progress {
                    let checked = checked_counter.fetch_add(1, Ordering::Relaxed) + 1;
                    callback(checked, candidate.url.clone());
                }
                (candidate, verdict)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let urls_checked = results.len();

        // Probes complete in whatever order the network allows; the report
        // ordering contract is row ascending, then column ascending.
        results.sort_by_key(|(candidate, _)| (candidate.row, candidate.col));

        let broken_links: Vec<BrokenLink> = results
            .into_iter()
            .filter_map(|(candidate, verdict)| match verdict {
                ProbeVerdict::Reachable => None,
                ProbeVerdict::Unreachable { reason } => Some(BrokenLink {
                    cell: cell_address(candidate.row, candidate.col),
                    url: candidate.url,
                    reason,
                }),
            })
            .collect();

        let report = ScanReport::new(urls_found, urls_checked, broken_links);
        info!("Scan complete: {}", report.message);
        Ok(report)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
