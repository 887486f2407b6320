use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// What one probe stage produced: a status line, or no response at all.
///
/// Stage 1's failure feeds stage 2 as plain data; classification stays a
/// transformation over these values instead of error unwinding.
#[derive(Debug)]
pub enum StageOutcome {
    Completed(u16),
    TransportFailed(reqwest::Error),
}

/// The classified outcome of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeVerdict {
    Reachable,
    Unreachable { reason: String },
}

impl ProbeVerdict {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeVerdict::Reachable)
    }
}

/// Checks URL reachability with a lightweight HEAD request, falling back
/// to a full GET when the HEAD did not settle the question. Many servers
/// refuse HEAD but serve GET normally, so a stage-1 failure alone never
/// condemns a URL.
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_MAX_REDIRECTS)
    }

    pub fn with_config(timeout: Duration, max_redirects: usize) -> Self {
        let client = Client::builder()
            .user_agent("Deadcell/0.1 (https://github.com/trapdoorsec/deadcell)")
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Probe one URL. Every failure mode terminates in a verdict; this
    /// never returns an error and never panics.
    pub async fn probe(&self, url: &str) -> ProbeVerdict {
        match self.attempt(Method::HEAD, url).await {
            StageOutcome::Completed(status) if completes_lightweight_stage(status) => {
                classify_status(status)
            }
            outcome => {
                match &outcome {
                    StageOutcome::Completed(status) => {
                        debug!("HEAD {} returned {}, falling back to GET", url, status);
                    }
                    StageOutcome::TransportFailed(err) => {
                        debug!("HEAD {} failed ({}), falling back to GET", url, err);
                    }
                }
                match self.attempt(Method::GET, url).await {
                    StageOutcome::Completed(status) => classify_status(status),
                    StageOutcome::TransportFailed(err) => classify_transport_failure(&err),
                }
            }
        }
    }

    async fn attempt(&self, method: Method, url: &str) -> StageOutcome {
        match self.client.request(method, url).send().await {
            Ok(response) => StageOutcome::Completed(response.status().as_u16()),
            Err(err) => StageOutcome::TransportFailed(err),
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}

/// A lightweight-stage status below 500 stands as the final answer, with
/// one exception: 405 means the server rejected the HEAD method itself,
/// so the full fetch gets to decide.
fn completes_lightweight_stage(status: u16) -> bool {
    status < 500 && status != StatusCode::METHOD_NOT_ALLOWED.as_u16()
}

fn classify_status(status: u16) -> ProbeVerdict {
    if (200..400).contains(&status) {
        ProbeVerdict::Reachable
    } else {
        ProbeVerdict::Unreachable {
            reason: format!("HTTP {}", status),
        }
    }
}

fn classify_transport_failure(err: &reqwest::Error) -> ProbeVerdict {
    let chain = error_chain_text(err);
    let lowered = chain.to_lowercase();

    let reason = if err.is_timeout() {
        "Request timeout".to_string()
    } else if err.is_redirect() {
        "Too many redirects".to_string()
    } else if lowered.contains("dns") || lowered.contains("failed to lookup") {
        "Domain not found".to_string()
    } else if lowered.contains("connection refused") {
        "Connection refused".to_string()
    } else if let Some(status) = err.status() {
        format!("HTTP {}", status.as_u16())
    } else {
        chain
    };

    ProbeVerdict::Unreachable { reason }
}

/// Flatten a reqwest error and its sources into one line. The interesting
/// part (DNS failure, refused connection) usually sits a level or two down
/// the cause chain.
fn error_chain_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    text
}
