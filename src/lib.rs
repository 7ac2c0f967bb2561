//! Narcissus - Reflected XSS Scanner
//!
//! Probes a target URL for reflected cross-site scripting by delivering
//! payloads through query parameters, HTML forms, request headers, and
//! cookies, then checking each response for the payload coming back.
//! Generates HTML and JSON reports.

pub mod config;
pub mod detector;
pub mod error;
pub mod http;
pub mod models;
pub mod payloads;
pub mod report;
pub mod scanner;
