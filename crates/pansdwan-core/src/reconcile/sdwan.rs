use pansdwan_api::Error as ApiError;
use tracing::{debug, info, warn};

use super::{CreateOutcome, Reconciler};
use crate::device::Device;
use crate::error::{CoreError, Step};
use crate::model::{Observed, SdwanInterface, SdwanInterfaceKey, SdwanInterfaceState};
use crate::resolver;

/// Reconciler for SD-WAN interface units and their vsys import.
#[derive(Debug, Clone, Copy)]
pub struct SdwanInterfaces<'a> {
    device: &'a Device,
}

impl<'a> SdwanInterfaces<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }
}

impl Reconciler for SdwanInterfaces<'_> {
    type Desired = SdwanInterface;
    type Key = SdwanInterfaceKey;
    type State = SdwanInterfaceState;
    type Created = CreateOutcome<SdwanInterfaceKey>;

    /// Create the unit, then import it into its vsys.
    ///
    /// An import failure does not undo the unit: the outcome is
    /// `CreatedUnbound` so the caller keeps tracking what now exists.
    async fn create(&self, desired: SdwanInterface) -> Result<Self::Created, CoreError> {
        desired.validate()?;
        let client = self.device.session().await?;
        let SdwanInterface {
            key,
            protocol,
            comment,
            members,
            vsys,
        } = desired;

        client
            .set_sdwan_unit(&key.template, &key.name, &protocol, &comment, &members)
            .await?;
        info!(unit = %key, members = members.len(), "sdwan unit created");

        match client
            .import_interface_to_vsys(&key.template, &vsys, &key.name)
            .await
        {
            Ok(()) => {
                info!(unit = %key, vsys, "sdwan unit imported into vsys");
                Ok(CreateOutcome::Created(key))
            }
            Err(e) => {
                let error = CoreError::step(Step::BindVsys)(e);
                warn!(unit = %key, vsys, error = %error, "sdwan unit created but vsys import failed");
                Ok(CreateOutcome::CreatedUnbound { key, error })
            }
        }
    }

    async fn read(&self, key: &SdwanInterfaceKey) -> Result<Observed<SdwanInterfaceState>, CoreError> {
        let client = self.device.session().await?;
        let entry = client.get_sdwan_unit(&key.template, &key.name).await?;
        if entry.is_none() {
            debug!(unit = %key, "sdwan unit not present");
        }
        Ok(entry.map(SdwanInterfaceState::from).into())
    }

    /// Push protocol and comment, then move the vsys import if it changed.
    ///
    /// Template, name and member list are fixed after creation; changing
    /// any of them is refused before the device is contacted.
    async fn update(
        &self,
        key: &SdwanInterfaceKey,
        old: &SdwanInterface,
        new: &SdwanInterface,
    ) -> Result<(), CoreError> {
        new.validate()?;
        if new.key.template != key.template {
            return Err(CoreError::RequiresReplacement { field: "template" });
        }
        if new.key.name != key.name {
            return Err(CoreError::RequiresReplacement { field: "name" });
        }
        if new.members != old.members {
            return Err(CoreError::RequiresReplacement { field: "members" });
        }

        let client = self.device.session().await?;

        client
            .set_sdwan_unit_settings(&key.template, &key.name, &new.protocol, &new.comment)
            .await
            .map_err(CoreError::step(Step::SetSettings))?;
        debug!(unit = %key, protocol = new.protocol, "sdwan unit settings pushed");

        if old.vsys == new.vsys {
            return Ok(());
        }

        if old.vsys.is_empty() {
            debug!(unit = %key, "no previous vsys to leave");
        } else {
            client
                .remove_interface_from_vsys(&key.template, &old.vsys, &key.name)
                .await
                .map_err(CoreError::step(Step::UnbindVsys))?;
        }

        client
            .import_interface_to_vsys(&key.template, &new.vsys, &key.name)
            .await
            .map_err(CoreError::step(Step::BindVsys))?;

        info!(unit = %key, from = old.vsys, to = new.vsys, "sdwan unit moved between vsys");
        Ok(())
    }

    /// Delete the unit, clearing blocking references once if the device
    /// names them.
    async fn delete(&self, key: &SdwanInterfaceKey) -> Result<(), CoreError> {
        let client = self.device.session().await?;

        let err = match client.delete_sdwan_unit(&key.template, &key.name).await {
            Ok(()) => {
                info!(unit = %key, "sdwan unit deleted");
                return Ok(());
            }
            Err(e) => e,
        };

        let references = match &err {
            ApiError::Device { lines, .. } if resolver::is_reference_error(lines) => {
                Some(resolver::extract_references(lines))
            }
            _ => None,
        };
        let Some(references) = references else {
            return Err(err.into());
        };
        if references.is_empty() {
            warn!(unit = %key, "delete blocked by references that could not be identified");
            return Err(err.into());
        }

        warn!(
            unit = %key,
            virtual_router = ?references.virtual_router,
            vsys = ?references.vsys,
            zone = ?references.zone,
            "delete blocked by references; clearing them"
        );
        resolver::clear_references(&client, key, &references).await?;

        client.delete_sdwan_unit(&key.template, &key.name).await?;
        info!(unit = %key, "sdwan unit deleted after clearing references");
        Ok(())
    }
}
