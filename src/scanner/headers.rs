//! Header injection probe

use super::SurfaceProbe;
use crate::http::HttpClient;
use crate::models::{Surface, TestResult};
use async_trait::async_trait;
use url::Url;

/// Request headers that commonly end up echoed in pages or logs
const INJECTED_HEADERS: &[&str] = &["User-Agent", "Referer", "X-Forwarded-For"];

/// Sends one GET with the payload in every injected header.
///
/// Payloads that are not valid header values (embedded CR/LF and the like)
/// are rejected by the request builder and come back as error results.
pub struct HeaderProbe {
    target: Url,
}

impl HeaderProbe {
    pub fn new(target: Url) -> Self {
        Self { target }
    }
}

#[async_trait]
impl SurfaceProbe for HeaderProbe {
    fn name(&self) -> &str {
        "headers"
    }

    async fn probe(&self, client: &HttpClient, payload: &str) -> Vec<TestResult> {
        let headers: Vec<(String, String)> = INJECTED_HEADERS
            .iter()
            .map(|h| (h.to_string(), payload.to_string()))
            .collect();

        let sent = client.get_with_headers(self.target.as_str(), &headers).await;
        vec![super::unit_result(Surface::Headers, payload, self.target.as_str(), sent).await]
    }
}
