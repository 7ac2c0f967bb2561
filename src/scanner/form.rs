//! Form discovery and submission probe

use super::SurfaceProbe;
use crate::http::HttpClient;
use crate::models::{Surface, TestResult};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// How a form asks to be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// Extracted form data (Send-safe, no references into the scraper DOM)
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    /// Position of the form on the page, 1-based
    pub index: usize,
    /// Submission URL, already resolved against the page URL
    pub action: Url,
    pub method: FormMethod,
    /// Named input/textarea/select fields, in document order
    pub fields: Vec<String>,
}

/// Fetches the target page and extracts its forms.
///
/// An unreachable target or unreadable body yields an empty set: the form
/// surface simply has nothing to test.
pub async fn discover_forms(client: &HttpClient, target: &Url) -> Vec<FormDescriptor> {
    match client.get(target.as_str()).await {
        Ok(response) => match response.text().await {
            Ok(body) => extract_forms(target, &body),
            Err(e) => {
                debug!("Could not read target page body: {e}");
                Vec::new()
            }
        },
        Err(e) => {
            debug!("Could not fetch target page: {e}");
            Vec::new()
        }
    }
}

/// Extracts form descriptors from HTML (synchronous, no await while the DOM is held)
pub fn extract_forms(page_url: &Url, html: &str) -> Vec<FormDescriptor> {
    let document = Html::parse_document(html);
    let mut forms = Vec::new();

    let form_selector = match Selector::parse("form") {
        Ok(s) => s,
        Err(_) => return forms,
    };
    // A single comma selector keeps the fields in document order
    let field_selector = match Selector::parse("input[name], textarea[name], select[name]") {
        Ok(s) => s,
        Err(_) => return forms,
    };

    for (i, form) in document.select(&form_selector).enumerate() {
        let action_attr = form.value().attr("action").unwrap_or("");
        let action = if action_attr.is_empty() {
            page_url.clone()
        } else {
            page_url
                .join(action_attr)
                .unwrap_or_else(|_| page_url.clone())
        };

        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        };

        let mut fields: Vec<String> = Vec::new();
        for field in form.select(&field_selector) {
            if let Some(name) = field.value().attr("name") {
                if !name.is_empty() && !fields.iter().any(|f| f == name) {
                    fields.push(name.to_string());
                }
            }
        }

        forms.push(FormDescriptor {
            index: i + 1,
            action,
            method,
            fields,
        });
    }

    forms
}

/// Submits every discovered form with the payload in each named field.
///
/// A form with no named fields is still submitted, so every form yields
/// one result per payload.
pub struct FormProbe {
    forms: Vec<FormDescriptor>,
}

impl FormProbe {
    pub fn new(forms: Vec<FormDescriptor>) -> Self {
        Self { forms }
    }

    /// Builds the submission URL for a GET form (every field set to the payload)
    fn get_url(form: &FormDescriptor, payload: &str) -> Url {
        let mut url = form.action.clone();
        if !form.fields.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for field in &form.fields {
                pairs.append_pair(field, payload);
            }
        }
        url
    }

    /// Builds the form-encoded body for a POST form
    fn post_body(form: &FormDescriptor, payload: &str) -> String {
        let mut body = url::form_urlencoded::Serializer::new(String::new());
        for field in &form.fields {
            body.append_pair(field, payload);
        }
        body.finish()
    }
}

#[async_trait]
impl SurfaceProbe for FormProbe {
    fn name(&self) -> &str {
        "form"
    }

    async fn probe(&self, client: &HttpClient, payload: &str) -> Vec<TestResult> {
        let mut results = Vec::new();

        for form in &self.forms {
            let surface = Surface::Form(form.index);
            let result = match form.method {
                FormMethod::Get => {
                    let url = Self::get_url(form, payload);
                    let sent = client.get(url.as_str()).await;
                    super::unit_result(surface, payload, url.as_str(), sent).await
                }
                FormMethod::Post => {
                    let body = Self::post_body(form, payload);
                    let sent = client.post_form(form.action.as_str(), &body).await;
                    super::unit_result(surface, payload, form.action.as_str(), sent).await
                }
            };
            results.push(result);
        }

        results
    }
}
