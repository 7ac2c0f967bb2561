//! Integration tests for the individual injection surfaces

mod common;

use common::test_config;
use narcissus::models::{Outcome, Surface};
use narcissus::scanner;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Form Surface ──

#[tokio::test]
async fn test_post_form_submission() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <form action="/submit" method="post">
            <input name="username" type="text" />
            <textarea name="comment"></textarea>
            <button type="submit">Send</button>
        </form>
    </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    // Only the exact form-encoded body reaches the reflecting response
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(body_string("username=xss-probe&comment=xss-probe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>You said xss-probe</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &["xss-probe".to_string()])
        .await
        .expect("scan");

    let form_result = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Form(1))
        .expect("form surface result");
    assert!(form_result.vulnerable);
    assert_eq!(
        form_result.tested_url,
        format!("{}/submit", mock_server.uri())
    );
    match &form_result.outcome {
        Outcome::Response { status, .. } => assert_eq!(*status, 200),
        Outcome::Error { message } => panic!("expected a response, got error: {message}"),
    }
}

#[tokio::test]
async fn test_get_form_submission_uses_query_params() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <form action="/search" method="get">
            <input name="term" type="text" />
        </form>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("term", "formxss"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>formxss</body></html>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &["formxss".to_string()])
        .await
        .expect("scan");

    let form_result = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Form(1))
        .expect("form surface result");
    assert!(form_result.vulnerable);
    assert_eq!(
        form_result.tested_url,
        format!("{}/search?term=formxss", mock_server.uri())
    );
}

#[tokio::test]
async fn test_form_without_action_submits_to_page_url() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <form>
            <input name="comment" type="text" />
        </form>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(query_param("comment", "reflectme"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>reflectme</body></html>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &["reflectme".to_string()])
        .await
        .expect("scan");

    let form_result = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Form(1))
        .expect("form surface result");
    // Missing action and method fall back to the page URL and GET
    assert!(form_result.vulnerable);
    assert_eq!(
        form_result.tested_url,
        format!("{}/?comment=reflectme", mock_server.uri())
    );
}

#[tokio::test]
async fn test_multiple_forms_each_get_a_result() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <form action="/first"><input name="a" /></form>
        <form action="/second" method="post"><input name="b" /></form>
    </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>ok</body></html>"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &["probe".to_string()])
        .await
        .expect("scan");

    let first = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Form(1))
        .expect("first form result");
    let second = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Form(2))
        .expect("second form result");

    assert_eq!(
        first.tested_url,
        format!("{}/first?a=probe", mock_server.uri())
    );
    assert_eq!(second.tested_url, format!("{}/second", mock_server.uri()));
}

// ── Header Surface ──

#[tokio::test]
async fn test_header_surface_injects_all_three_headers() {
    let mock_server = MockServer::start().await;
    let payload = "hdr-probe";

    Mock::given(method("GET"))
        .and(header("User-Agent", payload))
        .and(header("Referer", payload))
        .and(header("X-Forwarded-For", payload))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>agent: hdr-probe</body></html>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>no echo</body></html>"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &[payload.to_string()])
        .await
        .expect("scan");

    let headers_result = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Headers)
        .expect("header surface result");
    // Vulnerable only if all three injected headers reached the server
    assert!(headers_result.vulnerable);
    assert_eq!(
        headers_result.tested_url,
        format!("{}/", mock_server.uri())
    );
}

// ── Cookie Surface ──

#[tokio::test]
async fn test_cookie_surface_sends_session_cookie() {
    let mock_server = MockServer::start().await;
    let payload = "cookie-probe";

    Mock::given(method("GET"))
        .and(header("Cookie", "sessionid=cookie-probe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>session: cookie-probe</body></html>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>no echo</body></html>"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let report = scanner::scan(&config, &[payload.to_string()])
        .await
        .expect("scan");

    let cookie_result = report
        .results
        .iter()
        .find(|r| r.surface == Surface::Cookies)
        .expect("cookie surface result");
    assert!(cookie_result.vulnerable);
}
