//! Core data models for the Narcissus scanner

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of response body characters kept as evidence
pub const SNIPPET_CHARS: usize = 300;

/// Injection surface a test request was delivered through
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum Surface {
    /// Query string injection on the target URL
    Get,
    /// Submission of the nth form found on the page (1-based)
    Form(usize),
    /// Header injection (User-Agent, Referer, X-Forwarded-For)
    Headers,
    /// Cookie value injection
    Cookies,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Get => write!(f, "GET"),
            Surface::Form(n) => write!(f, "FORM #{n}"),
            Surface::Headers => write!(f, "HEADERS"),
            Surface::Cookies => write!(f, "COOKIES"),
        }
    }
}

impl From<Surface> for String {
    fn from(surface: Surface) -> String {
        surface.to_string()
    }
}

impl TryFrom<String> for Surface {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "GET" => Ok(Surface::Get),
            "HEADERS" => Ok(Surface::Headers),
            "COOKIES" => Ok(Surface::Cookies),
            other => other
                .strip_prefix("FORM #")
                .and_then(|n| n.parse::<usize>().ok())
                .map(Surface::Form)
                .ok_or_else(|| format!("unknown surface label: {other}")),
        }
    }
}

/// What came back for a single test request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The server answered; status and a capped body excerpt are kept
    Response { status: u16, snippet: String },
    /// The request never completed (connect failure, timeout, rejected header bytes)
    Error { message: String },
}

/// Result of one payload delivered through one surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Surface the payload went through
    pub surface: Surface,
    /// Payload exactly as loaded
    pub payload: String,
    /// URL the probe actually requested
    pub tested_url: String,
    /// Whether the payload was reflected in the response
    pub vulnerable: bool,
    /// Response evidence or transport error, never both
    pub outcome: Outcome,
}

impl TestResult {
    /// Creates a result for a completed request, capping the body excerpt
    pub fn completed(
        surface: Surface,
        payload: impl Into<String>,
        tested_url: impl Into<String>,
        vulnerable: bool,
        status: u16,
        body: &str,
    ) -> Self {
        let snippet: String = body.chars().take(SNIPPET_CHARS).collect();
        Self {
            surface,
            payload: payload.into(),
            tested_url: tested_url.into(),
            vulnerable,
            outcome: Outcome::Response { status, snippet },
        }
    }

    /// Creates a result for a request that failed in transit; never vulnerable
    pub fn failed(
        surface: Surface,
        payload: impl Into<String>,
        tested_url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            surface,
            payload: payload.into(),
            tested_url: tested_url.into(),
            vulnerable: false,
            outcome: Outcome::Error {
                message: message.into(),
            },
        }
    }

    /// True when the request never completed
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }
}

/// Result of a complete scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Target URL
    pub target: String,
    /// Unique scan identifier
    pub scan_id: String,
    /// Name stamped on generated reports
    pub display_name: String,
    /// Scan start time (local timezone)
    pub started_at: DateTime<Local>,
    /// Scan end time (local timezone)
    pub finished_at: Option<DateTime<Local>>,
    /// Number of payloads exercised
    pub payload_count: usize,
    /// Total HTTP requests made
    pub total_requests: u64,
    /// Every test outcome, in completion order
    pub results: Vec<TestResult>,
}

impl ScanReport {
    /// Creates a new ScanReport
    pub fn new(target: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scan_id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            started_at: Local::now(),
            finished_at: None,
            payload_count: 0,
            total_requests: 0,
            results: Vec::new(),
        }
    }

    /// Returns the number of results flagged vulnerable
    pub fn vulnerable_count(&self) -> usize {
        self.results.iter().filter(|r| r.vulnerable).count()
    }

    /// Returns the number of completed results with no reflection
    pub fn clean_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.vulnerable && !r.is_error())
            .count()
    }

    /// Returns the number of results whose request never completed
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_error()).count()
    }

    /// Marks the scan as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }
}

/// Configuration for a scan session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target URL to scan
    pub target: String,
    /// Path to the payload list, one payload per line
    #[serde(default = "default_payloads_path")]
    pub payloads_path: String,
    /// Worker pool width
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User-Agent header value for non-injected requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Name stamped on generated reports
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

fn default_payloads_path() -> String {
    "payloads/xss.txt".to_string()
}

fn default_threads() -> usize {
    10
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Narcissus-Scanner/0.1.0".to_string()
}

fn default_display_name() -> String {
    "Narcissus".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            payloads_path: default_payloads_path(),
            threads: default_threads(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            display_name: default_display_name(),
        }
    }
}
