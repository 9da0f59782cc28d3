use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialize a request piped in on stdin.
///
/// An interactive terminal or blank input yields `None` so the caller can
/// report which inputs are missing.
pub fn read_request<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = raw.len(), "request read from stdin");
    let request = serde_json::from_str(&raw)
        .map_err(|e| format!("stdin is not a valid request: {e}"))?;
    Ok(Some(request))
}
