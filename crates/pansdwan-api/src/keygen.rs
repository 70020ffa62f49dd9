// API key generation
//
// `type=keygen` exchanges a username and password for an API key. The
// password travels in the query string, so every error produced here is
// stripped of its URL before it can reach a log line or a caller.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::XmlApiClient;
use crate::error::{Error, preview};
use crate::models::{KeygenResult, ResultEnvelope};
use crate::response::{Status, parse_envelope};

impl XmlApiClient {
    /// Obtain a fresh API key for `username`.
    ///
    /// `GET /api/?type=keygen&user=..&password=..`
    ///
    /// The key is returned, not stored; attach it with
    /// [`with_api_key`](Self::with_api_key).
    pub async fn keygen(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let mut url = self.base_url().join("/api/")?;
        url.query_pairs_mut()
            .clear()
            .append_pair("type", "keygen")
            .append_pair("user", username)
            .append_pair("password", password.expose_secret());

        debug!(user = username, host = ?self.base_url().host_str(), "requesting API key");

        let resp = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| Error::from_send(e.without_url(), self.timeout_secs()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::from_send(e.without_url(), self.timeout_secs()))?;

        if status != StatusCode::OK {
            return Err(Error::Authentication {
                message: format!("keygen rejected (HTTP {}): {}", status.as_u16(), preview(&body))
                    .trim_end()
                    .to_owned(),
            });
        }

        let envelope = parse_envelope(&body)?;
        if envelope.status == Status::Error {
            return Err(Error::Authentication {
                message: format!("keygen rejected: {}", envelope.lines.join(" ")),
            });
        }

        let decoded: ResultEnvelope<KeygenResult> =
            quick_xml::de::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        match decoded.result.and_then(|r| r.key) {
            Some(key) if !key.trim().is_empty() => {
                debug!("API key obtained");
                Ok(SecretString::from(key.trim().to_owned()))
            }
            _ => Err(Error::Authentication {
                message: "API key not found in keygen response".into(),
            }),
        }
    }
}
