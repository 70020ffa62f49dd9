// ── Runtime connection configuration ──
//
// Describes *how* to reach a device. Carries credential data and transport
// tuning but never touches disk or the environment; callers (or
// `pansdwan-config`) build a `DeviceEndpoint` and hand it in.

use std::time::Duration;

use pansdwan_api::transport::DEFAULT_TIMEOUT;
use pansdwan_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// Management endpoint and credentials of a single device.
///
/// `host` may be a bare hostname or address (`fw.example`, `192.0.2.1:8443`),
/// which is reached over HTTPS, or a full URL with an explicit scheme.
#[derive(Debug, Clone)]
pub struct DeviceEndpoint {
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Accept self-signed or otherwise invalid certificates.
    pub skip_tls_verify: bool,
    /// Wall-clock limit for every individual HTTP call.
    pub timeout: Duration,
}

impl DeviceEndpoint {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            skip_tls_verify: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Management base URL derived from `host`.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(CoreError::Config {
                message: "device host is empty".into(),
            });
        }

        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("https://{host}")
        };

        Url::parse(&raw).map_err(|e| CoreError::Config {
            message: format!("invalid device host {host:?}: {e}"),
        })
    }

    /// Transport settings for clients talking to this device.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from_skip_verify(self.skip_tls_verify),
            timeout: self.timeout,
        }
    }
}
