// pansdwan-api: Async client for the PAN-OS XML configuration API

pub mod client;
pub mod error;
pub mod keygen;
pub mod models;
pub mod response;
pub mod routers;
pub mod sdwan;
pub mod transport;
pub mod vsys;
pub mod xpath;
pub mod zones;

pub use client::XmlApiClient;
pub use error::Error;
pub use models::{MemberList, SdwanUnitEntry};
pub use response::{Envelope, Status};
pub use transport::{TlsMode, TransportConfig};
pub use xpath::{Action, ConfigRequest};
