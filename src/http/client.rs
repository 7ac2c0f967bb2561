//! HTTP client wrapper with request tracking

use crate::error::Result;
use crate::models::ScanConfig;
use reqwest::{Client, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper with request counting
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    request_count: Arc<AtomicU64>,
}

impl HttpClient {
    /// Creates a new HttpClient from scan configuration.
    ///
    /// Certificate verification is disabled (self-signed staging targets are
    /// in scope), redirects are capped at 10, and no cookie store is kept so
    /// probes cannot leak cookies into each other.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            request_count: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Sends a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.send(self.client.get(url)).await
    }

    /// Sends a GET request with custom headers
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Response> {
        let mut req = self.client.get(url);
        for (key, value) in headers {
            req = req.header(key.as_str(), value.as_str());
        }
        self.send(req).await
    }

    /// Sends a POST request with a form-encoded body
    pub async fn post_form(&self, url: &str, body: &str) -> Result<Response> {
        let req = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string());
        self.send(req).await
    }

    /// Returns the total number of requests attempted
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Response> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let response = req.send().await?;
        debug!("Response: {} for {}", response.status(), response.url());
        Ok(response)
    }
}
