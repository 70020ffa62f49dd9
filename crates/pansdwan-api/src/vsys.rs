// Vsys interface-import endpoints

use tracing::debug;

use crate::client::XmlApiClient;
use crate::error::Error;
use crate::xpath;

impl XmlApiClient {
    /// Add `interface` to the vsys's `import/network/interface` list.
    pub async fn import_interface_to_vsys(
        &self,
        template: &str,
        vsys: &str,
        interface: &str,
    ) -> Result<(), Error> {
        debug!(template, vsys, interface, "importing interface into vsys");
        self.set_config(
            xpath::vsys_import(template, vsys),
            xpath::member_element(interface),
        )
        .await
    }

    /// Remove `interface` from the vsys's import list.
    pub async fn remove_interface_from_vsys(
        &self,
        template: &str,
        vsys: &str,
        interface: &str,
    ) -> Result<(), Error> {
        debug!(template, vsys, interface, "removing interface from vsys");
        self.delete_config(xpath::vsys_import_member(template, vsys, interface))
            .await
    }
}
