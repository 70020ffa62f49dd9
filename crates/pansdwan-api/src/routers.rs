// Virtual router interface endpoints

use tracing::debug;

use crate::client::XmlApiClient;
use crate::error::Error;
use crate::xpath;

impl XmlApiClient {
    /// Remove `interface` from a virtual router's interface list.
    pub async fn remove_interface_from_virtual_router(
        &self,
        template: &str,
        router: &str,
        interface: &str,
    ) -> Result<(), Error> {
        debug!(template, router, interface, "removing interface from virtual router");
        self.delete_config(xpath::virtual_router_member(template, router, interface))
            .await
    }
}
