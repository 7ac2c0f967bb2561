//! HTML report generation using Tera templates

use crate::error::Result;
use crate::models::{ScanReport, TestResult};
use std::path::Path;
use tera::{Context, Tera};
use tracing::info;

/// Generates an HTML report from a scan report
pub fn generate(report: &ScanReport, output_path: &Path) -> Result<()> {
    let template_path = "templates/report.html";
    let template_content =
        std::fs::read_to_string(template_path).unwrap_or_else(|_| default_template().to_string());

    let mut tera = Tera::default();
    tera.add_raw_template("report.html", &template_content)?;

    let vulnerable: Vec<&TestResult> = report.results.iter().filter(|r| r.vulnerable).collect();
    let errored: Vec<&TestResult> = report.results.iter().filter(|r| r.is_error()).collect();
    let clean: Vec<&TestResult> = report
        .results
        .iter()
        .filter(|r| !r.vulnerable && !r.is_error())
        .collect();

    let mut context = Context::new();
    context.insert("display_name", &report.display_name);
    context.insert("target", &report.target);
    context.insert("scan_id", &report.scan_id);
    context.insert("started_at", &report.started_at.to_rfc3339());
    context.insert(
        "finished_at",
        &report
            .finished_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "N/A".to_string()),
    );
    context.insert("payload_count", &report.payload_count);
    context.insert("total_requests", &report.total_requests);
    context.insert("vulnerable_results", &vulnerable);
    context.insert("clean_results", &clean);
    context.insert("error_results", &errored);
    context.insert("vulnerable_count", &vulnerable.len());
    context.insert("clean_count", &clean.len());
    context.insert("error_count", &errored.len());
    context.insert("total_results", &report.results.len());
    context.insert("version", env!("CARGO_PKG_VERSION"));

    let rendered = tera.render("report.html", &context)?;
    std::fs::write(output_path, rendered)?;
    info!("HTML report saved to {}", output_path.display());
    Ok(())
}

fn default_template() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ display_name }} - Reflected XSS Report</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f1f5f9; color: #1e293b; line-height: 1.6; }
        .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
        .header { background: linear-gradient(135deg, #0f172a 0%, #1e293b 50%, #334155 100%); color: white; padding: 40px 30px; border-radius: 12px; margin-bottom: 30px; text-align: center; }
        .header h1 { font-size: 2.2em; margin-bottom: 5px; letter-spacing: 2px; }
        .header .subtitle { opacity: 0.8; font-size: 1.1em; }
        .header .meta { opacity: 0.6; margin-top: 15px; font-size: 0.9em; }
        .summary { display: grid; grid-template-columns: repeat(4, 1fr); gap: 15px; margin-bottom: 30px; }
        @media (max-width: 768px) { .summary { grid-template-columns: repeat(2, 1fr); } }
        .card { background: white; padding: 25px 15px; border-radius: 10px; text-align: center; box-shadow: 0 1px 3px rgba(0,0,0,0.1); border-top: 4px solid #e2e8f0; }
        .card .count { font-size: 2.5em; font-weight: 800; }
        .card .label { font-size: 0.85em; text-transform: uppercase; letter-spacing: 1px; margin-top: 5px; opacity: 0.7; }
        .card.vulnerable { border-top-color: #dc2626; } .card.vulnerable .count { color: #dc2626; }
        .card.clean { border-top-color: #16a34a; } .card.clean .count { color: #16a34a; }
        .card.errored { border-top-color: #ca8a04; } .card.errored .count { color: #ca8a04; }
        .card.total { border-top-color: #2563eb; } .card.total .count { color: #2563eb; }
        .section-title { font-size: 1.4em; font-weight: 700; margin: 30px 0 15px; padding-bottom: 10px; border-bottom: 2px solid #e2e8f0; }
        .finding { background: white; padding: 25px; border-radius: 10px; margin-bottom: 15px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); border-left: 4px solid #dc2626; }
        .finding h3 { margin-bottom: 10px; font-size: 1.1em; }
        .badge { display: inline-block; padding: 2px 10px; border-radius: 20px; color: white; font-size: 0.75em; font-weight: 700; text-transform: uppercase; letter-spacing: 0.5px; vertical-align: middle; margin-right: 8px; background: #dc2626; }
        .finding p { margin: 8px 0; color: #475569; }
        .finding .label { font-weight: 600; color: #1e293b; }
        pre { background: #f8fafc; border: 1px solid #e2e8f0; padding: 15px; border-radius: 6px; overflow-x: auto; font-size: 0.85em; margin: 8px 0; white-space: pre-wrap; word-wrap: break-word; }
        table { width: 100%; border-collapse: collapse; background: white; border-radius: 10px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1); font-size: 0.9em; }
        th { background: #f8fafc; text-align: left; padding: 12px 15px; text-transform: uppercase; font-size: 0.75em; letter-spacing: 1px; color: #64748b; }
        td { padding: 12px 15px; border-top: 1px solid #f1f5f9; word-break: break-all; }
        .info-bar { background: white; padding: 15px 25px; border-radius: 10px; margin-bottom: 20px; display: flex; justify-content: space-between; flex-wrap: wrap; gap: 10px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); font-size: 0.9em; color: #64748b; }
        .disclaimer { background: #fffbeb; border: 1px solid #fde68a; padding: 15px 25px; border-radius: 10px; margin-top: 30px; font-size: 0.85em; color: #92400e; }
        .footer { text-align: center; padding: 30px; color: #94a3b8; font-size: 0.85em; margin-top: 30px; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>&#129694; {{ display_name }}</h1>
            <div class="subtitle">Reflected XSS Scan Report</div>
            <div class="meta">Target: {{ target }} | Scan ID: {{ scan_id }}</div>
        </div>
        <div class="info-bar">
            <span><strong>Started:</strong> {{ started_at }}</span>
            <span><strong>Finished:</strong> {{ finished_at }}</span>
            <span><strong>Payloads:</strong> {{ payload_count }}</span>
            <span><strong>Requests:</strong> {{ total_requests }}</span>
        </div>
        <div class="summary">
            <div class="card vulnerable"><div class="count">{{ vulnerable_count }}</div><div class="label">Vulnerable</div></div>
            <div class="card clean"><div class="count">{{ clean_count }}</div><div class="label">Clean</div></div>
            <div class="card errored"><div class="count">{{ error_count }}</div><div class="label">Errors</div></div>
            <div class="card total"><div class="count">{{ total_results }}</div><div class="label">Total Tests</div></div>
        </div>
        <div class="section-title">Vulnerability Details ({{ vulnerable_count }})</div>
        {% for r in vulnerable_results %}
        <div class="finding">
            <h3><span class="badge">{{ r.surface }}</span>Payload reflected in response</h3>
            <p><span class="label">Payload:</span></p><pre>{{ r.payload }}</pre>
            <p><span class="label">Tested URL:</span> {{ r.tested_url }}</p>
            <p><span class="label">Status:</span> {{ r.outcome.response.status }}</p>
            <p><span class="label">Response excerpt:</span></p><pre>{{ r.outcome.response.snippet }}</pre>
        </div>
        {% endfor %}
        {% if vulnerable_count == 0 %}
        <div class="finding" style="border-left-color: #16a34a;"><h3>No reflections detected</h3><p>No payload came back in any tested response.</p></div>
        {% endif %}
        {% if clean_count > 0 %}
        <div class="section-title">Secure Test Cases ({{ clean_count }})</div>
        <table>
            <tr><th>Surface</th><th>Payload</th><th>Tested URL</th><th>Status</th></tr>
            {% for r in clean_results %}
            <tr><td>{{ r.surface }}</td><td>{{ r.payload }}</td><td>{{ r.tested_url }}</td><td>{{ r.outcome.response.status }}</td></tr>
            {% endfor %}
        </table>
        {% endif %}
        {% if error_count > 0 %}
        <div class="section-title">Errored Test Cases ({{ error_count }})</div>
        <table>
            <tr><th>Surface</th><th>Payload</th><th>Tested URL</th><th>Error</th></tr>
            {% for r in error_results %}
            <tr><td>{{ r.surface }}</td><td>{{ r.payload }}</td><td>{{ r.tested_url }}</td><td>{{ r.outcome.error.message }}</td></tr>
            {% endfor %}
        </table>
        {% endif %}
        <div class="disclaimer"><strong>Disclaimer:</strong> This report was generated by an automated reflection scan. Findings indicate that input was echoed back unencoded and should be verified manually before remediation. Only test systems you are authorized to assess.</div>
        <div class="footer">Generated by {{ display_name }} (Narcissus v{{ version }}) | {{ started_at }}</div>
    </div>
</body>
</html>"#
}
