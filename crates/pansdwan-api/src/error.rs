use thiserror::Error;

/// Top-level error type for the `pansdwan-api` crate.
///
/// Covers every failure mode of the XML API surface: key generation,
/// transport, HTTP status, device-reported errors and envelope decoding.
/// `pansdwan-core` maps these into user-facing error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Keygen was rejected, returned no key, or a config call was made
    /// on a client that holds no key.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-200 response. The body is kept verbatim and never decoded as XML.
    #[error("HTTP {status}: {}", preview(body))]
    HttpStatus { status: u16, body: String },

    // ── Device ──────────────────────────────────────────────────────
    /// `<response status="error">` envelope.
    #[error("PAN-OS API error (code {}): {}", code.as_deref().unwrap_or("none"), lines.join(" "))]
    Device {
        code: Option<String>,
        lines: Vec<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not a decodable XML envelope, with the raw body
    /// for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Diagnostic lines of a device-reported error, if this is one.
    pub fn device_lines(&self) -> Option<&[String]> {
        match self {
            Self::Device { lines, .. } => Some(lines),
            _ => None,
        }
    }

    /// Map a reqwest failure, pulling timeouts out into [`Error::Timeout`].
    pub(crate) fn from_send(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Transport(err)
        }
    }
}

/// First 200 characters of a response body, for error text.
pub(crate) fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map_or(body.len(), |(idx, _)| idx);
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_error_display_joins_lines() {
        let err = Error::Device {
            code: Some("12".into()),
            lines: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "PAN-OS API error (code 12): first second");
        assert_eq!(err.device_lines().map(<[String]>::len), Some(2));
    }

    #[test]
    fn http_status_display_truncates_body() {
        let err = Error::HttpStatus {
            status: 502,
            body: "x".repeat(500),
        };
        assert_eq!(err.to_string().len(), "HTTP 502: ".len() + 200);
    }

    #[test]
    fn preview_stops_on_a_char_boundary() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), 200);
        assert_eq!(preview("short"), "short");
    }
}
