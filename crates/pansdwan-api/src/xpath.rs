// XPath request builder
//
// Pure functions that address nodes in the device's candidate configuration
// tree and describe the XML element bodies pushed with `action=set`.
// Identifier segments are emitted as XPath string literals; percent-encoding
// happens once, when the request descriptor is serialised into a URL.

use std::borrow::Cow;
use std::fmt;

use quick_xml::escape::escape;
use url::Url;

/// The single device entry every Panorama template and firewall config uses.
const LOCALHOST: &str = "devices/entry[@name='localhost.localdomain']";

// ── Literals ─────────────────────────────────────────────────────────

/// Quote `value` as an XPath 1.0 string literal.
///
/// Single quotes are preferred. Values containing `'` switch to double
/// quotes, and values containing both fall back to `concat(...)`.
pub fn literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{part}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

// ── Node paths ───────────────────────────────────────────────────────

/// `.../template/entry[@name=T]/config/devices/entry[@name='localhost.localdomain']`
pub fn template_root(template: &str) -> String {
    format!(
        "/config/{LOCALHOST}/template/entry[@name={}]/config/{LOCALHOST}",
        literal(template)
    )
}

/// An SD-WAN interface unit under the template's network configuration.
pub fn sdwan_unit(template: &str, unit: &str) -> String {
    format!(
        "{}/network/interface/sdwan/units/entry[@name={}]",
        template_root(template),
        literal(unit)
    )
}

fn vsys_entry(template: &str, vsys: &str) -> String {
    format!("{}/vsys/entry[@name={}]", template_root(template), literal(vsys))
}

/// A vsys's interface-import member list.
pub fn vsys_import(template: &str, vsys: &str) -> String {
    format!("{}/import/network/interface", vsys_entry(template, vsys))
}

/// One interface inside a vsys's import list.
pub fn vsys_import_member(template: &str, vsys: &str, interface: &str) -> String {
    format!(
        "{}/member[text()={}]",
        vsys_import(template, vsys),
        literal(interface)
    )
}

/// One interface inside a virtual router's interface list.
pub fn virtual_router_member(template: &str, router: &str, interface: &str) -> String {
    format!(
        "{}/network/virtual-router/entry[@name={}]/interface/member[text()={}]",
        template_root(template),
        literal(router),
        literal(interface)
    )
}

/// A zone's layer-3 member list.
pub fn zone_layer3(template: &str, vsys: &str, zone: &str) -> String {
    format!(
        "{}/zone/entry[@name={}]/network/layer3",
        vsys_entry(template, vsys),
        literal(zone)
    )
}

/// One interface inside a zone's layer-3 member list.
pub fn zone_layer3_member(template: &str, vsys: &str, zone: &str, interface: &str) -> String {
    format!(
        "{}/member[text()={}]",
        zone_layer3(template, vsys, zone),
        literal(interface)
    )
}

// ── Element bodies ───────────────────────────────────────────────────

fn text(value: &str) -> Cow<'_, str> {
    escape(value)
}

/// `<member>NAME</member>`
pub fn member_element(name: &str) -> String {
    format!("<member>{}</member>", text(name))
}

/// Protocol and comment children of an SD-WAN unit.
///
/// Comment text is XML-escaped and otherwise sent as-is, spaces included.
pub fn sdwan_unit_settings_element(protocol: &str, comment: &str) -> String {
    format!(
        "<protocol>{}</protocol><comment>{}</comment>",
        text(protocol),
        text(comment)
    )
}

/// Full body of an SD-WAN unit: settings plus the ordered member list.
pub fn sdwan_unit_element<S: AsRef<str>>(protocol: &str, comment: &str, members: &[S]) -> String {
    let mut element = sdwan_unit_settings_element(protocol, comment);
    element.push_str("<interface>");
    for member in members {
        element.push_str(&member_element(member.as_ref()));
    }
    element.push_str("</interface>");
    element
}

// ── Request descriptor ───────────────────────────────────────────────

/// The `action` query parameter of a config call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Set,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete `type=config` request: method, target and optional element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRequest {
    pub action: Action,
    pub xpath: String,
    pub element: Option<String>,
}

impl ConfigRequest {
    pub fn get(xpath: String) -> Self {
        Self {
            action: Action::Get,
            xpath,
            element: None,
        }
    }

    pub fn set(xpath: String, element: String) -> Self {
        Self {
            action: Action::Set,
            xpath,
            element: Some(element),
        }
    }

    pub fn delete(xpath: String) -> Self {
        Self {
            action: Action::Delete,
            xpath,
            element: None,
        }
    }

    /// The XML API takes every call as a GET.
    pub const METHOD: reqwest::Method = reqwest::Method::GET;

    /// Serialise into `{base}/api/?type=config&action=..&xpath=..[&element=..]`.
    ///
    /// Every value is form-encoded exactly once, so identifiers containing
    /// `/`, `'`, `&` or spaces arrive at the device as their literal text.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.join("/api/")?;
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("type", "config");
            query.append_pair("action", self.action.as_str());
            query.append_pair("xpath", &self.xpath);
            if let Some(ref element) = self.element {
                query.append_pair("element", element);
            }
        }
        Ok(url)
    }
}
