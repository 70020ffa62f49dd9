// Shared transport configuration for building reqwest::Client instances.
//
// Every top-level operation builds its own client from this config, so TLS
// and timeout policy live in exactly one place.

use std::time::Duration;

/// Default wall-clock timeout for every device call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    Verify,
    /// Accept any certificate (for self-signed management interfaces).
    AcceptInvalid,
}

impl TlsMode {
    pub fn from_skip_verify(skip: bool) -> Self {
        if skip { Self::AcceptInvalid } else { Self::Verify }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::Verify,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("pansdwan/", env!("CARGO_PKG_VERSION")));

        if self.tls == TlsMode::AcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
