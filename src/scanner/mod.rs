//! Surface probes and the scan engine

pub mod cookies;
pub mod form;
pub mod headers;
pub mod query;

use crate::detector::is_reflected;
use crate::error::{NarcissusError, Result};
use crate::http::HttpClient;
use crate::models::{ScanConfig, ScanReport, Surface, TestResult};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};
use url::Url;

/// Trait implemented by every injection surface
#[async_trait]
pub trait SurfaceProbe: Send + Sync {
    /// Returns the surface name
    fn name(&self) -> &str;

    /// Delivers one payload through this surface.
    ///
    /// Transport failures are folded into error-flagged results, so this
    /// returns one result per request attempted and never fails outright.
    async fn probe(&self, client: &HttpClient, payload: &str) -> Vec<TestResult>;
}

/// Folds the outcome of one test request into a TestResult.
///
/// Every surface detects reflections the same way; a request or body-read
/// failure becomes a non-vulnerable error record.
pub(crate) async fn unit_result(
    surface: Surface,
    payload: &str,
    tested_url: &str,
    sent: Result<reqwest::Response>,
) -> TestResult {
    match sent {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => {
                    let vulnerable = is_reflected(&body, payload);
                    TestResult::completed(surface, payload, tested_url, vulnerable, status, &body)
                }
                Err(e) => TestResult::failed(surface, payload, tested_url, e.to_string()),
            }
        }
        Err(e) => TestResult::failed(surface, payload, tested_url, e.to_string()),
    }
}

/// Schedules payload/surface test units onto a bounded worker pool
pub struct ScanEngine {
    probes: Vec<Arc<dyn SurfaceProbe>>,
    pool_width: usize,
}

impl ScanEngine {
    /// Prepares an engine for a target: parses the URL, discovers forms once,
    /// and registers the four surface probes.
    ///
    /// The form set is fetched a single time and shared by every payload
    /// unit; a target page that cannot be fetched or parsed just leaves the
    /// form surface with nothing to test.
    pub async fn prepare(client: &HttpClient, config: &ScanConfig) -> Result<Self> {
        let target = Url::parse(&config.target)?;

        let forms = form::discover_forms(client, &target).await;
        info!("Discovered {} form(s) on {}", forms.len(), target);

        let probes: Vec<Arc<dyn SurfaceProbe>> = vec![
            Arc::new(query::QueryProbe::new(target.clone())),
            Arc::new(form::FormProbe::new(forms)),
            Arc::new(headers::HeaderProbe::new(target.clone())),
            Arc::new(cookies::CookieProbe::new(target)),
        ];

        Ok(Self {
            probes,
            pool_width: config.threads.max(1),
        })
    }

    /// Runs every payload through every surface and collects the results.
    ///
    /// Units run on a worker pool of `pool_width` permits. The call returns
    /// only after every unit has finished; results are in completion order.
    pub async fn run(&self, client: &HttpClient, payloads: &[String]) -> Vec<TestResult> {
        let total = payloads.len() * self.probes.len();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message("Testing payloads...");

        let semaphore = Arc::new(Semaphore::new(self.pool_width));
        let mut set = JoinSet::new();

        for payload in payloads {
            for probe in &self.probes {
                let probe = Arc::clone(probe);
                let client = client.clone();
                let payload = payload.clone();
                let sem = Arc::clone(&semaphore);
                let name = probe.name().to_string();

                set.spawn(async move {
                    let _permit = match sem.acquire().await {
                        Ok(p) => p,
                        Err(_) => return Vec::new(),
                    };
                    debug!("Delivering payload through {} surface", name);
                    probe.probe(&client, &payload).await
                });
            }
        }

        let mut results = Vec::new();
        while let Some(join_result) = set.join_next().await {
            match join_result {
                Ok(unit_results) => results.extend(unit_results),
                Err(e) => error!("Probe task panicked: {e}"),
            }
            pb.inc(1);
        }

        pb.finish_with_message("Scan complete");
        results
    }
}

/// Runs a full scan: builds the client, prepares the engine, and executes
/// every payload against every surface.
pub async fn scan(config: &ScanConfig, payloads: &[String]) -> Result<ScanReport> {
    if payloads.is_empty() {
        return Err(NarcissusError::NoPayloads(config.payloads_path.clone()));
    }

    let client = HttpClient::from_config(config)?;
    let engine = ScanEngine::prepare(&client, config).await?;

    let mut report = ScanReport::new(&config.target, &config.display_name);
    report.payload_count = payloads.len();
    report.results = engine.run(&client, payloads).await;
    report.total_requests = client.request_count();
    report.finish();

    info!(
        "Scan finished: {} result(s), {} vulnerable, {} error(s)",
        report.results.len(),
        report.vulnerable_count(),
        report.error_count()
    );

    Ok(report)
}
