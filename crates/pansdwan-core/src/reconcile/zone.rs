use tracing::{debug, info};

use super::Reconciler;
use crate::device::Device;
use crate::error::CoreError;
use crate::model::{Observed, ZoneEntry};

/// Reconciler for an interface's membership in a zone's layer-3 list.
#[derive(Debug, Clone, Copy)]
pub struct ZoneEntries<'a> {
    device: &'a Device,
}

impl<'a> ZoneEntries<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }
}

impl Reconciler for ZoneEntries<'_> {
    type Desired = ZoneEntry;
    type Key = ZoneEntry;
    type State = Vec<String>;
    type Created = ZoneEntry;

    async fn create(&self, desired: ZoneEntry) -> Result<ZoneEntry, CoreError> {
        desired.validate()?;
        let client = self.device.session().await?;
        client
            .add_interface_to_zone(
                &desired.template,
                &desired.vsys,
                &desired.zone,
                &desired.interface,
            )
            .await?;
        info!(binding = %desired, "interface bound to zone");
        Ok(desired)
    }

    /// Reports the zone's whole layer-3 list, or `Absent` when the zone is
    /// missing or no longer lists the interface.
    async fn read(&self, key: &ZoneEntry) -> Result<Observed<Vec<String>>, CoreError> {
        let client = self.device.session().await?;
        let members = client
            .get_zone_layer3(&key.template, &key.vsys, &key.zone)
            .await?
            .map(|list| list.member);

        match members {
            Some(members) if members.iter().any(|m| *m == key.interface) => {
                Ok(Observed::Present(members))
            }
            Some(_) => {
                debug!(binding = %key, "zone no longer lists interface");
                Ok(Observed::Absent)
            }
            None => {
                debug!(binding = %key, "zone layer3 node not present");
                Ok(Observed::Absent)
            }
        }
    }

    /// Every field is identity, so there is nothing to push in place.
    async fn update(&self, key: &ZoneEntry, _old: &ZoneEntry, _new: &ZoneEntry) -> Result<(), CoreError> {
        debug!(binding = %key, "zone binding has no mutable fields; update is a no-op");
        Ok(())
    }

    async fn delete(&self, key: &ZoneEntry) -> Result<(), CoreError> {
        let client = self.device.session().await?;
        client
            .remove_interface_from_zone(&key.template, &key.vsys, &key.zone, &key.interface)
            .await?;
        info!(binding = %key, "interface removed from zone");
        Ok(())
    }
}
