//! Integration tests for report generation and persistence

use narcissus::models::{ScanReport, Surface, TestResult};
use narcissus::report::{html, json};
use tempfile::tempdir;

fn sample_report() -> ScanReport {
    let mut report = ScanReport::new("http://target.example", "Acme Security");
    report.payload_count = 2;
    report.total_requests = 7;
    report.results = vec![
        TestResult::completed(
            Surface::Get,
            "<script>alert(1)</script>",
            "http://target.example/?q=%3Cscript%3Ealert%281%29%3C%2Fscript%3E",
            true,
            200,
            "<html>echoed <script>alert(1)</script></html>",
        ),
        TestResult::completed(
            Surface::Form(2),
            "<script>alert(1)</script>",
            "http://target.example/submit",
            false,
            200,
            "<html>nothing echoed</html>",
        ),
        TestResult::failed(
            Surface::Cookies,
            "<script>alert(1)</script>",
            "http://target.example/",
            "connection refused",
        ),
    ];
    report.finish();
    report
}

// ── JSON Persistence ──

#[test]
fn test_json_export_and_load_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scan.json");

    let report = sample_report();
    json::export(&report, &path).expect("export");

    let loaded = json::load(&path).expect("load");
    assert_eq!(loaded.target, report.target);
    assert_eq!(loaded.scan_id, report.scan_id);
    assert_eq!(loaded.display_name, "Acme Security");
    assert_eq!(loaded.payload_count, 2);
    assert_eq!(loaded.total_requests, 7);
    assert_eq!(loaded.results.len(), 3);
    assert_eq!(loaded.results[1].surface, Surface::Form(2));
    assert_eq!(loaded.results[2].outcome, report.results[2].outcome);
    assert_eq!(loaded.vulnerable_count(), 1);
    assert_eq!(loaded.error_count(), 1);
}

#[test]
fn test_json_surface_serializes_as_label() {
    let report = sample_report();
    let value = serde_json::to_value(&report).expect("to_value");

    let results = value["results"].as_array().expect("results array");
    assert_eq!(results[0]["surface"], "GET");
    assert_eq!(results[1]["surface"], "FORM #2");
    assert_eq!(results[2]["surface"], "COOKIES");
}

#[test]
fn test_json_outcome_is_response_or_error() {
    let report = sample_report();
    let value = serde_json::to_value(&report).expect("to_value");

    let ok = &value["results"][0]["outcome"];
    assert_eq!(ok["response"]["status"], 200);
    assert!(ok.get("error").is_none());

    let err = &value["results"][2]["outcome"];
    assert_eq!(err["error"]["message"], "connection refused");
    assert!(err.get("response").is_none());
}

#[test]
fn test_json_load_rejects_malformed_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").expect("write");

    assert!(json::load(&path).is_err());
}

// ── HTML Reports ──

#[test]
fn test_html_report_contains_findings_and_branding() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("report.html");

    let report = sample_report();
    html::generate(&report, &path).expect("generate");

    let contents = std::fs::read_to_string(&path).expect("read report");
    assert!(contents.contains("Acme Security"));
    assert!(contents.contains("http://target.example"));
    assert!(contents.contains("Vulnerability Details"));
    assert!(contents.contains("GET"));
    // Payloads are escaped, never emitted as live markup
    assert!(contents.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    assert!(!contents.contains("<script>alert(1)</script>"));
}

#[test]
fn test_html_report_lists_errored_test_cases() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("report.html");

    let report = sample_report();
    html::generate(&report, &path).expect("generate");

    let contents = std::fs::read_to_string(&path).expect("read report");
    assert!(contents.contains("Errored Test Cases"));
    assert!(contents.contains("connection refused"));
}

#[test]
fn test_html_report_without_findings_shows_all_clear() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("clean.html");

    let mut report = ScanReport::new("http://target.example", "Narcissus");
    report.results = vec![TestResult::completed(
        Surface::Get,
        "probe",
        "http://target.example/?q=probe",
        false,
        200,
        "quiet page",
    )];
    report.finish();
    html::generate(&report, &path).expect("generate");

    let contents = std::fs::read_to_string(&path).expect("read report");
    assert!(contents.contains("No reflections detected"));
}
