// ── Device handle ──
//
// Entry point of the core crate. Holds the endpoint description and hands
// out reconcilers. Every top-level operation opens its own session: build
// an HTTP client, exchange credentials for an API key, issue the calls,
// drop the client.

use pansdwan_api::{TransportConfig, XmlApiClient};
use tracing::debug;
use url::Url;

use crate::config::DeviceEndpoint;
use crate::error::CoreError;
use crate::reconcile::{SdwanInterfaces, ZoneEntries};

/// A firewall or Panorama reached over its XML API.
#[derive(Debug, Clone)]
pub struct Device {
    endpoint: DeviceEndpoint,
    base_url: Url,
    transport: TransportConfig,
}

impl Device {
    /// Validate the endpoint and prepare a handle. Makes no network calls.
    pub fn new(endpoint: DeviceEndpoint) -> Result<Self, CoreError> {
        if endpoint.username.trim().is_empty() {
            return Err(CoreError::Config {
                message: "device username is empty".into(),
            });
        }
        let base_url = endpoint.base_url()?;
        let transport = endpoint.transport();
        Ok(Self {
            endpoint,
            base_url,
            transport,
        })
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Open an authenticated client for one operation.
    pub async fn session(&self) -> Result<XmlApiClient, CoreError> {
        let client = XmlApiClient::new(self.base_url.clone(), &self.transport)?;
        let key = client
            .keygen(&self.endpoint.username, &self.endpoint.password)
            .await?;
        debug!(host = ?self.base_url.host_str(), "session opened");
        Ok(client.with_api_key(key))
    }

    /// Reconciler for SD-WAN interface units.
    pub fn sdwan_interfaces(&self) -> SdwanInterfaces<'_> {
        SdwanInterfaces::new(self)
    }

    /// Reconciler for zone layer-3 bindings.
    pub fn zone_entries(&self) -> ZoneEntries<'_> {
        ZoneEntries::new(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::SecretString;

    use super::*;

    #[test]
    fn rejects_empty_username() {
        let endpoint = DeviceEndpoint::new("fw", " ", SecretString::from("pw".to_owned()));
        assert!(matches!(Device::new(endpoint), Err(CoreError::Config { .. })));
    }

    #[test]
    fn derives_base_url() {
        let endpoint = DeviceEndpoint::new("192.0.2.1", "admin", SecretString::from("pw".to_owned()));
        let device = Device::new(endpoint).unwrap();
        assert_eq!(device.base_url().as_str(), "https://192.0.2.1/");
    }
}
