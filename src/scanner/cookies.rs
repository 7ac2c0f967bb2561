//! Cookie injection probe

use super::SurfaceProbe;
use crate::http::HttpClient;
use crate::models::{Surface, TestResult};
use async_trait::async_trait;
use url::Url;

/// Cookie name carrying the payload
const COOKIE_NAME: &str = "sessionid";

/// Sends one GET with the payload as the session cookie value
pub struct CookieProbe {
    target: Url,
}

impl CookieProbe {
    pub fn new(target: Url) -> Self {
        Self { target }
    }
}

#[async_trait]
impl SurfaceProbe for CookieProbe {
    fn name(&self) -> &str {
        "cookies"
    }

    async fn probe(&self, client: &HttpClient, payload: &str) -> Vec<TestResult> {
        let headers = [("Cookie".to_string(), format!("{COOKIE_NAME}={payload}"))];

        let sent = client.get_with_headers(self.target.as_str(), &headers).await;
        vec![super::unit_result(Surface::Cookies, payload, self.target.as_str(), sent).await]
    }
}
