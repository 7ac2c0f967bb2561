//! Common test utilities

use narcissus::models::ScanConfig;

/// Creates a test ScanConfig pointing to a wiremock server
pub fn test_config(target: &str) -> ScanConfig {
    ScanConfig {
        target: target.to_string(),
        threads: 4,
        timeout_secs: 5,
        user_agent: "Narcissus-Test/0.1.0".to_string(),
        ..ScanConfig::default()
    }
}
