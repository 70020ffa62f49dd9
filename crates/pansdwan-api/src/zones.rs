// Zone layer-3 membership endpoints
//
// Zones are vsys-scoped: `vsys/entry[@name=V]/zone/entry[@name=Z]/network/layer3`.

use tracing::debug;

use crate::client::XmlApiClient;
use crate::error::Error;
use crate::models::{MemberList, ZoneLayer3Result};
use crate::xpath;

impl XmlApiClient {
    /// Add `interface` as a layer-3 member of the zone.
    pub async fn add_interface_to_zone(
        &self,
        template: &str,
        vsys: &str,
        zone: &str,
        interface: &str,
    ) -> Result<(), Error> {
        debug!(template, vsys, zone, interface, "adding interface to zone");
        self.set_config(
            xpath::zone_layer3(template, vsys, zone),
            xpath::member_element(interface),
        )
        .await
    }

    /// Read the zone's layer-3 member list; `Ok(None)` if the node is absent.
    pub async fn get_zone_layer3(
        &self,
        template: &str,
        vsys: &str,
        zone: &str,
    ) -> Result<Option<MemberList>, Error> {
        debug!(template, vsys, zone, "reading zone layer3 members");
        let result: Option<ZoneLayer3Result> =
            self.get_config(xpath::zone_layer3(template, vsys, zone)).await?;
        Ok(result.map(|r| r.layer3))
    }

    /// Remove `interface` from the zone's layer-3 list.
    pub async fn remove_interface_from_zone(
        &self,
        template: &str,
        vsys: &str,
        zone: &str,
        interface: &str,
    ) -> Result<(), Error> {
        debug!(template, vsys, zone, interface, "removing interface from zone");
        self.delete_config(xpath::zone_layer3_member(template, vsys, zone, interface))
            .await
    }
}
