// pansdwan-core: Reconciliation engine for PAN-OS SD-WAN interface units
//
// Sits between an orchestrator holding desired state and the raw XML API
// client in `pansdwan-api`. Consumers build a `Device` from a
// `DeviceEndpoint` and drive its reconcilers:
//
//   let device = Device::new(endpoint)?;
//   let unit = device.sdwan_interfaces().create(desired).await?.into_result()?;
//   device.sdwan_interfaces().delete(&unit).await?;

pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod resolver;

// ── Primary re-exports ──────────────────────────────────────────────

pub use config::DeviceEndpoint;
pub use device::Device;
pub use error::{CoreError, ErrorKind, Step};
pub use reconcile::{CreateOutcome, Reconciler, SdwanInterfaces, ZoneEntries};
pub use resolver::{References, extract_references};

pub use model::{
    DEFAULT_PROTOCOL, Observed, SdwanInterface, SdwanInterfaceKey, SdwanInterfaceState, ZoneEntry,
};
