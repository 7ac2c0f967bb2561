//! GET query string injection probe

use super::SurfaceProbe;
use crate::http::HttpClient;
use crate::models::{Surface, TestResult};
use async_trait::async_trait;
use url::Url;

/// Rewrites a URL so every query parameter carries the payload.
///
/// A URL with no parameters gets a synthetic `q` parameter instead.
/// Blank-valued parameters are treated as absent, and repeated names
/// collapse to their first occurrence. The result is form-urlencoded.
pub fn inject_query(target: &Url, payload: &str) -> Url {
    let mut names: Vec<String> = Vec::new();
    for (name, value) in target.query_pairs() {
        if name.is_empty() || value.is_empty() {
            continue;
        }
        if !names.iter().any(|n| n == name.as_ref()) {
            names.push(name.to_string());
        }
    }

    let mut url = target.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        if names.is_empty() {
            pairs.append_pair("q", payload);
        } else {
            for name in &names {
                pairs.append_pair(name, payload);
            }
        }
    }
    url
}

/// Probes the target URL's query string
pub struct QueryProbe {
    target: Url,
}

impl QueryProbe {
    pub fn new(target: Url) -> Self {
        Self { target }
    }
}

#[async_trait]
impl SurfaceProbe for QueryProbe {
    fn name(&self) -> &str {
        "query"
    }

    async fn probe(&self, client: &HttpClient, payload: &str) -> Vec<TestResult> {
        let url = inject_query(&self.target, payload);
        let sent = client.get(url.as_str()).await;
        vec![super::unit_result(Surface::Get, payload, url.as_str(), sent).await]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_query_synthesizes_param() {
        let target = Url::parse("http://example.com/page").expect("valid url");
        let url = inject_query(&target, "<script>alert(1)</script>");
        assert_eq!(
            url.as_str(),
            "http://example.com/page?q=%3Cscript%3Ealert%281%29%3C%2Fscript%3E"
        );
    }

    #[test]
    fn test_inject_query_overwrites_every_param() {
        let target = Url::parse("http://example.com/search?q=hello&lang=en").expect("valid url");
        let url = inject_query(&target, "xss");
        assert_eq!(url.as_str(), "http://example.com/search?q=xss&lang=xss");
    }

    #[test]
    fn test_inject_query_blank_values_count_as_absent() {
        let target = Url::parse("http://example.com/page?a=&b=").expect("valid url");
        let url = inject_query(&target, "xss");
        assert_eq!(url.as_str(), "http://example.com/page?q=xss");
    }

    #[test]
    fn test_inject_query_keeps_only_non_blank_params() {
        let target = Url::parse("http://example.com/page?a=&b=2").expect("valid url");
        let url = inject_query(&target, "xss");
        assert_eq!(url.as_str(), "http://example.com/page?b=xss");
    }

    #[test]
    fn test_inject_query_duplicate_names_collapse() {
        let target = Url::parse("http://example.com/page?a=1&a=2&b=3").expect("valid url");
        let url = inject_query(&target, "xss");
        assert_eq!(url.as_str(), "http://example.com/page?a=xss&b=xss");
    }

    #[test]
    fn test_inject_query_encodes_payload() {
        let target = Url::parse("http://example.com/?id=5").expect("valid url");
        let url = inject_query(&target, "\"><svg onload=alert(1)>");
        assert_eq!(
            url.as_str(),
            "http://example.com/?id=%22%3E%3Csvg+onload%3Dalert%281%29%3E"
        );
    }
}
