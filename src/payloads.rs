//! Payload list loading

use std::path::Path;
use tracing::{info, warn};

/// Loads payloads from a line-oriented file.
///
/// Lines are trimmed and blank lines skipped; file order is preserved.
/// There is no comment syntax: every non-blank line is a payload. A missing
/// or unreadable file yields an empty list, not an error.
pub fn load_payloads(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let payloads: Vec<String> = content
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            info!("Loaded {} payload(s) from {}", payloads.len(), path.display());
            payloads
        }
        Err(e) => {
            warn!("Could not read payload file {}: {e}", path.display());
            Vec::new()
        }
    }
}
