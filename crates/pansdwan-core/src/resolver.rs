// ── Dependency resolver ──
//
// The device refuses to delete an interface that other configuration still
// points at, and reports who points at it only as free text:
//
//   sdwan.1 cannot be deleted because of references from:
//    template -> branch -> config -> devices -> localhost.localdomain -> network -> virtual-router -> default -> interface
//    template -> branch -> config -> devices -> localhost.localdomain -> vsys -> vsys1 -> zone -> untrust -> network -> layer3
//
// `extract_references` scrapes the `->` chains for the virtual router, vsys
// and zone names; `clear_references` removes the interface from each of them
// so the delete can be retried.

use pansdwan_api::XmlApiClient;
use tracing::{debug, warn};

use crate::error::{CoreError, Step};
use crate::model::SdwanInterfaceKey;

/// Text the device uses when a delete is blocked by references.
pub const REFERENCE_ERROR_MARKER: &str = "cannot be deleted because of references from";

const CHAIN_SEPARATOR: &str = "->";

/// Objects still holding a reference to an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub virtual_router: Option<String>,
    pub vsys: Option<String>,
    /// Zone name. Zones are vsys-scoped, so it is only actionable with `vsys`.
    pub zone: Option<String>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.virtual_router.is_none() && self.vsys.is_none() && self.zone.is_none()
    }
}

/// Whether diagnostic lines describe a delete blocked by references.
pub fn is_reference_error<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .iter()
        .any(|line| line.as_ref().contains(REFERENCE_ERROR_MARKER))
}

/// Pull referencing object names out of the device's diagnostic lines.
///
/// Each line is split on `->`; a segment equal to `virtual-router`, `vsys`
/// or `zone` names the object in the segment after it. Lines with no such
/// token are ignored. When a token appears more than once, the last
/// non-empty name wins.
///
/// A zone only counts when its own chain also names the vsys it lives in,
/// and once a zone is found that vsys is kept over vsys-only chains.
pub fn extract_references<S: AsRef<str>>(lines: &[S]) -> References {
    let mut refs = References::default();

    for line in lines {
        let chain = scan_chain(line.as_ref());

        if chain.virtual_router.is_some() {
            refs.virtual_router = chain.virtual_router;
        }
        match (chain.vsys, chain.zone) {
            (Some(vsys), Some(zone)) => {
                refs.vsys = Some(vsys);
                refs.zone = Some(zone);
            }
            (Some(vsys), None) if refs.zone.is_none() => refs.vsys = Some(vsys),
            _ => {}
        }
    }

    refs
}

/// Token names found on a single `->` chain.
fn scan_chain(line: &str) -> References {
    let mut found = References::default();
    let segments: Vec<&str> = line.split(CHAIN_SEPARATOR).map(str::trim).collect();

    for pair in segments.windows(2) {
        let [token, name] = pair else { continue };
        if name.is_empty() {
            continue;
        }
        let slot = match *token {
            "virtual-router" => &mut found.virtual_router,
            "vsys" => &mut found.vsys,
            "zone" => &mut found.zone,
            _ => continue,
        };
        *slot = Some((*name).to_owned());
    }

    found
}

/// Remove `unit` from every object in `references`.
///
/// Order is fixed: virtual router, then zone, then vsys import. Zone and
/// import membership both sit under the vsys, and the zone must go first or
/// the import removal trips the same reference check. The first failure
/// aborts; removals already made are not restored.
pub async fn clear_references(
    client: &XmlApiClient,
    unit: &SdwanInterfaceKey,
    references: &References,
) -> Result<(), CoreError> {
    if let Some(ref router) = references.virtual_router {
        debug!(unit = %unit, router, "removing unit from virtual router");
        client
            .remove_interface_from_virtual_router(&unit.template, router, &unit.name)
            .await
            .map_err(CoreError::step(Step::UnbindVirtualRouter))?;
    }

    if let Some(ref zone) = references.zone {
        match references.vsys {
            Some(ref vsys) => {
                debug!(unit = %unit, vsys, zone, "removing unit from zone");
                client
                    .remove_interface_from_zone(&unit.template, vsys, zone, &unit.name)
                    .await
                    .map_err(CoreError::step(Step::UnbindZone))?;
            }
            None => warn!(unit = %unit, zone, "zone reference without a vsys; cannot address it"),
        }
    }

    if let Some(ref vsys) = references.vsys {
        debug!(unit = %unit, vsys, "removing unit from vsys import");
        client
            .remove_interface_from_vsys(&unit.template, vsys, &unit.name)
            .await
            .map_err(CoreError::step(Step::UnbindVsys))?;
    }

    Ok(())
}
