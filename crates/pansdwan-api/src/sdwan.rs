// SD-WAN interface unit endpoints
//
// Units live under the template's `network/interface/sdwan/units` node.

use tracing::debug;

use crate::client::XmlApiClient;
use crate::error::Error;
use crate::models::{SdwanUnitEntry, SdwanUnitResult};
use crate::xpath;

impl XmlApiClient {
    /// Create or merge an SD-WAN unit with its full body.
    pub async fn set_sdwan_unit<S: AsRef<str>>(
        &self,
        template: &str,
        name: &str,
        protocol: &str,
        comment: &str,
        members: &[S],
    ) -> Result<(), Error> {
        debug!(template, name, members = members.len(), "setting sdwan unit");
        self.set_config(
            xpath::sdwan_unit(template, name),
            xpath::sdwan_unit_element(protocol, comment, members),
        )
        .await
    }

    /// Push only protocol and comment onto an existing unit.
    pub async fn set_sdwan_unit_settings(
        &self,
        template: &str,
        name: &str,
        protocol: &str,
        comment: &str,
    ) -> Result<(), Error> {
        debug!(template, name, "updating sdwan unit settings");
        self.set_config(
            xpath::sdwan_unit(template, name),
            xpath::sdwan_unit_settings_element(protocol, comment),
        )
        .await
    }

    /// Read a unit back; `Ok(None)` if it does not exist.
    pub async fn get_sdwan_unit(
        &self,
        template: &str,
        name: &str,
    ) -> Result<Option<SdwanUnitEntry>, Error> {
        debug!(template, name, "reading sdwan unit");
        let result: Option<SdwanUnitResult> =
            self.get_config(xpath::sdwan_unit(template, name)).await?;
        Ok(result.and_then(|r| r.entry))
    }

    /// Delete a unit. Fails with a device error while anything references it.
    pub async fn delete_sdwan_unit(&self, template: &str, name: &str) -> Result<(), Error> {
        debug!(template, name, "deleting sdwan unit");
        self.delete_config(xpath::sdwan_unit(template, name)).await
    }
}
