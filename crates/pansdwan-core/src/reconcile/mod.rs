// ── Reconcilers ──
//
// The create/read/update/delete contract an external orchestrator drives.
// Each method is one top-level operation with its own device session.

mod sdwan;
mod zone;

pub use sdwan::SdwanInterfaces;
pub use zone::ZoneEntries;

use crate::error::CoreError;
use crate::model::Observed;

/// Drives one kind of device object toward a desired state.
#[allow(async_fn_in_trait)]
pub trait Reconciler {
    /// Full desired-state record supplied by the caller.
    type Desired;
    /// Identity of an object on the device.
    type Key;
    /// What a read can confirm.
    type State;
    /// What a successful create hands back.
    type Created;

    async fn create(&self, desired: Self::Desired) -> Result<Self::Created, CoreError>;

    /// `Observed::Absent` when the object does not exist; never an error for that.
    async fn read(&self, key: &Self::Key) -> Result<Observed<Self::State>, CoreError>;

    async fn update(
        &self,
        key: &Self::Key,
        old: &Self::Desired,
        new: &Self::Desired,
    ) -> Result<(), CoreError>;

    async fn delete(&self, key: &Self::Key) -> Result<(), CoreError>;
}

/// Result of a create that may have only partly applied.
#[derive(Debug)]
pub enum CreateOutcome<K> {
    /// Every step succeeded.
    Created(K),
    /// The object exists on the device but a follow-up binding failed.
    /// The caller should record `key` so the object stays tracked.
    CreatedUnbound { key: K, error: CoreError },
}

impl<K> CreateOutcome<K> {
    /// The key of the created object, present in both variants.
    pub fn key(&self) -> &K {
        match self {
            Self::Created(key) | Self::CreatedUnbound { key, .. } => key,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Collapse into a plain result, turning a partial create into
    /// [`CoreError::PartialFailure`].
    pub fn into_result(self) -> Result<K, CoreError>
    where
        K: std::fmt::Display,
    {
        match self {
            Self::Created(key) => Ok(key),
            Self::CreatedUnbound { key, error } => Err(CoreError::PartialFailure {
                unit: key.to_string(),
                source: Box::new(error),
            }),
        }
    }
}
