// XML API response types
//
// Serde models for the `<result>` payloads this client reads. Fields use
// `#[serde(default)]` liberally: the device omits empty nodes entirely.

use serde::Deserialize;

// ── Envelope ─────────────────────────────────────────────────────────

/// Outer `<response>` with its typed `<result>` child.
///
/// Status, code and diagnostics are read by
/// [`parse_envelope`](crate::response::parse_envelope); this struct only
/// carries the payload.
#[derive(Debug, Deserialize)]
pub struct ResultEnvelope<T> {
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

/// `<member>` children of a list node (`<interface>`, `<layer3>`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberList {
    #[serde(default)]
    pub member: Vec<String>,
}

// ── Keygen ───────────────────────────────────────────────────────────

/// `<result><key>..</key></result>` of `type=keygen`.
#[derive(Debug, Deserialize)]
pub struct KeygenResult {
    #[serde(default)]
    pub key: Option<String>,
}

// ── SD-WAN units ─────────────────────────────────────────────────────

/// `<result>` of a get on an SD-WAN unit entry.
#[derive(Debug, Deserialize)]
pub struct SdwanUnitResult {
    #[serde(default)]
    pub entry: Option<SdwanUnitEntry>,
}

/// An `<entry name="..">` under `network/interface/sdwan/units`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SdwanUnitEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub interface: MemberList,
}

// ── Zones ────────────────────────────────────────────────────────────

/// `<result>` of a get on a zone's `network/layer3` node.
#[derive(Debug, Deserialize)]
pub struct ZoneLayer3Result {
    #[serde(default)]
    pub layer3: MemberList,
}
