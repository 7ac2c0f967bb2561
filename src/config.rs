//! Configuration management for the Narcissus scanner

use crate::error::{NarcissusError, Result};
use crate::models::ScanConfig;
use serde::Deserialize;
use std::path::Path;

/// File-based configuration structure matching default.toml
#[derive(Debug, Deserialize)]
struct FileConfig {
    scan: Option<ScanSection>,
    report: Option<ReportSection>,
}

#[derive(Debug, Deserialize)]
struct ScanSection {
    payloads: Option<String>,
    threads: Option<usize>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportSection {
    display_name: Option<String>,
}

/// Loads configuration from a TOML file and merges with defaults
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let content = std::fs::read_to_string(path).map_err(NarcissusError::IoError)?;
    let file_config: FileConfig = toml::from_str(&content)?;

    let mut config = ScanConfig::default();

    if let Some(scan) = file_config.scan {
        if let Some(payloads) = scan.payloads {
            config.payloads_path = payloads;
        }
        if let Some(threads) = scan.threads {
            config.threads = threads;
        }
        if let Some(timeout) = scan.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(ua) = scan.user_agent {
            config.user_agent = ua;
        }
    }

    if let Some(report) = file_config.report {
        if let Some(name) = report.display_name {
            config.display_name = name;
        }
    }

    if config.threads == 0 {
        return Err(NarcissusError::ConfigError(
            "threads must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

/// Merges CLI arguments into an existing ScanConfig
pub fn merge_cli_args(
    config: &mut ScanConfig,
    target: String,
    payloads: Option<String>,
    threads: Option<usize>,
    timeout: Option<u64>,
    display_name: Option<String>,
) {
    config.target = target;

    if let Some(p) = payloads {
        config.payloads_path = p;
    }
    if let Some(t) = threads {
        config.threads = t;
    }
    if let Some(t) = timeout {
        config.timeout_secs = t;
    }
    if let Some(n) = display_name {
        config.display_name = n;
    }
}
