//! Reflection detection heuristics

use regex::Regex;

/// Checks whether a payload is reflected in a response body.
///
/// Three checks, any of which counts as a reflection: the payload appearing
/// verbatim, the payload inside a double-quoted string, and the payload
/// inside a script element (case-insensitive, across newlines). The payload
/// is treated as a literal; regex metacharacters in it carry no meaning.
pub fn is_reflected(body: &str, payload: &str) -> bool {
    if body.contains(payload) {
        return true;
    }

    let escaped = regex::escape(payload);

    if let Ok(re) = Regex::new(&format!("\".*{escaped}.*\"")) {
        if re.is_match(body) {
            return true;
        }
    }

    if let Ok(re) = Regex::new(&format!("(?is)<script[^>]*>.*{escaped}.*</script>")) {
        if re.is_match(body) {
            return true;
        }
    }

    false
}
