// XML API HTTP client
//
// Wraps `reqwest::Client` with the device's `/api/` query conventions,
// the `X-PAN-KEY` credential header and envelope interpretation. Node-level
// calls (SD-WAN units, vsys imports, zones, virtual routers) live in
// sibling modules as inherent methods so this file stays focused on
// transport mechanics.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::response;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};
use crate::xpath::ConfigRequest;

/// Header carrying the API key on every config call.
pub const API_KEY_HEADER: &str = "X-PAN-KEY";

/// Raw HTTP client for the device's XML configuration API.
///
/// A client is cheap to build and is meant to live for a single top-level
/// operation: build it, obtain a key with [`keygen`](Self::keygen), attach
/// it with [`with_api_key`](Self::with_api_key), issue the calls, drop it.
pub struct XmlApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
    api_key: Option<SecretString>,
}

impl XmlApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the management root, e.g. `https://192.0.2.1`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
            api_key: None,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            api_key: None,
        }
    }

    /// Attach the API key used for all subsequent config calls.
    #[must_use]
    pub fn with_api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The management base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn api_key(&self) -> Result<&SecretString, Error> {
        self.api_key.as_ref().ok_or_else(|| Error::Authentication {
            message: "no API key attached to client".into(),
        })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a config request and return the raw body of a 200 response.
    ///
    /// Any other HTTP status short-circuits into [`Error::HttpStatus`]
    /// before the body is looked at as XML.
    pub async fn execute(&self, request: &ConfigRequest) -> Result<String, Error> {
        let key = self.api_key()?;
        let url = request.url(&self.base_url)?;

        debug!(action = %request.action, xpath = %request.xpath, "config request");
        if let Some(ref element) = request.element {
            trace!(element = %element, "config element");
        }

        let resp = self
            .http
            .request(ConfigRequest::METHOD, url)
            .header(API_KEY_HEADER, key.expose_secret())
            .header(CONTENT_TYPE, "application/xml")
            .send()
            .await
            .map_err(|e| Error::from_send(e, self.timeout_secs))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::from_send(e, self.timeout_secs))?;

        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        trace!(body = %body, "config response");
        Ok(body)
    }

    /// `action=set` at `xpath` with `element`.
    pub async fn set_config(&self, xpath: String, element: String) -> Result<(), Error> {
        let body = self.execute(&ConfigRequest::set(xpath, element)).await?;
        response::interpret(&body)?;
        Ok(())
    }

    /// `action=delete` at `xpath`.
    pub async fn delete_config(&self, xpath: String) -> Result<(), Error> {
        let body = self.execute(&ConfigRequest::delete(xpath)).await?;
        response::interpret(&body)?;
        Ok(())
    }

    /// `action=get` at `xpath`; `Ok(None)` when the node does not exist.
    pub async fn get_config<T: DeserializeOwned>(&self, xpath: String) -> Result<Option<T>, Error> {
        let body = self.execute(&ConfigRequest::get(xpath)).await?;
        response::interpret_get(&body)
    }
}
