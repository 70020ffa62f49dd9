// Response interpreter
//
// Every XML API reply is wrapped in `<response status=".." code="..">`.
// Diagnostics come back as `<msg><line>..</line></msg>`, sometimes as bare
// `<msg>` text, sometimes wrapped in CDATA. The envelope is read with a
// streaming reader so all of those shapes land in one flat list of lines;
// typed `<result>` payloads are decoded separately through serde.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::models::ResultEnvelope;

/// Device code meaning "object does not exist".
pub const CODE_OBJECT_NOT_PRESENT: &str = "7";

/// `status` attribute of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

/// Decoded outer envelope of a device reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub status: Status,
    pub code: Option<String>,
    pub lines: Vec<String>,
}

impl Envelope {
    /// Device code 7: the addressed node does not exist.
    pub fn is_not_present(&self) -> bool {
        self.code.as_deref() == Some(CODE_OBJECT_NOT_PRESENT)
    }

    /// `Ok(self)` for success envelopes, [`Error::Device`] otherwise.
    pub fn into_result(self) -> Result<Self, Error> {
        match self.status {
            Status::Success => Ok(self),
            Status::Error => Err(Error::Device {
                code: self.code,
                lines: self.lines,
            }),
        }
    }
}

fn malformed(body: &str, reason: impl Display) -> Error {
    Error::Deserialization {
        message: reason.to_string(),
        body: body.to_owned(),
    }
}

fn is_diagnostic(name: &[u8]) -> bool {
    name == b"line" || name == b"msg"
}

fn open_envelope(start: &BytesStart<'_>, body: &str) -> Result<Envelope, Error> {
    if start.local_name().as_ref() != b"response" {
        return Err(malformed(
            body,
            format!(
                "expected <response> root, found <{}>",
                String::from_utf8_lossy(start.local_name().as_ref())
            ),
        ));
    }

    let mut status = None;
    let mut code = None;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(body, e))?;
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(body, e))?
            .into_owned();
        match attr.key.local_name().as_ref() {
            b"status" => status = Some(value),
            b"code" => code = Some(value),
            _ => {}
        }
    }

    let status = match status.as_deref() {
        Some("success") => Status::Success,
        Some("error") => Status::Error,
        other => {
            return Err(malformed(
                body,
                format!("unexpected response status {other:?}"),
            ));
        }
    };

    Ok(Envelope {
        status,
        code,
        lines: Vec::new(),
    })
}

fn flush_line(envelope: Option<&mut Envelope>, text: &mut String) {
    let line = text.trim();
    if !line.is_empty() {
        if let Some(env) = envelope {
            env.lines.push(line.to_owned());
        }
    }
    text.clear();
}

/// Decode the outer envelope of a device reply.
///
/// Fails with [`Error::Deserialization`] (raw body attached) when the body
/// is not XML or has no `<response>` root. Does not inspect `status`.
pub fn parse_envelope(body: &str) -> Result<Envelope, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut envelope: Option<Envelope> = None;
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(|e| malformed(body, e))? {
            Event::Start(start) => {
                if path.is_empty() {
                    if envelope.is_some() {
                        return Err(malformed(body, "multiple top-level elements"));
                    }
                    envelope = Some(open_envelope(&start, body)?);
                }
                let name = start.local_name().as_ref().to_vec();
                if is_diagnostic(&name) {
                    // Mixed content: text already gathered for the parent is its own line.
                    flush_line(envelope.as_mut(), &mut text);
                }
                path.push(name);
            }
            Event::Empty(start) => {
                if path.is_empty() {
                    if envelope.is_some() {
                        return Err(malformed(body, "multiple top-level elements"));
                    }
                    envelope = Some(open_envelope(&start, body)?);
                }
            }
            Event::Text(chunk) => {
                if path.last().is_some_and(|name| is_diagnostic(name)) {
                    let chunk = chunk.unescape().map_err(|e| malformed(body, e))?;
                    text.push_str(&chunk);
                }
            }
            Event::CData(chunk) => {
                if path.last().is_some_and(|name| is_diagnostic(name)) {
                    text.push_str(&String::from_utf8_lossy(chunk.as_ref()));
                }
            }
            Event::End(_) => {
                if let Some(name) = path.pop() {
                    if is_diagnostic(&name) {
                        flush_line(envelope.as_mut(), &mut text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(malformed(body, "unexpected end of document"));
    }

    envelope.ok_or_else(|| malformed(body, "no <response> element in body"))
}

/// Interpret a reply to a mutating call: success, or [`Error::Device`].
pub fn interpret(body: &str) -> Result<Envelope, Error> {
    parse_envelope(body)?.into_result()
}

/// Interpret a reply to `action=get`, decoding `<result>` into `T`.
///
/// Code 7 maps to `Ok(None)` whatever the `status` attribute says, so a
/// missing node is an absent outcome rather than a failure.
pub fn interpret_get<T: DeserializeOwned>(body: &str) -> Result<Option<T>, Error> {
    let envelope = parse_envelope(body)?;
    if envelope.is_not_present() {
        return Ok(None);
    }
    envelope.into_result()?;

    let decoded: ResultEnvelope<T> =
        quick_xml::de::from_str(body).map_err(|e| malformed(body, e))?;
    Ok(decoded.result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{MemberList, SdwanUnitResult};

    #[test]
    fn success_envelope_without_body() {
        let env = interpret(r#"<response status="success" code="20"><msg>command succeeded</msg></response>"#)
            .unwrap();
        assert_eq!(env.status, Status::Success);
        assert_eq!(env.code.as_deref(), Some("20"));
        assert_eq!(env.lines, vec!["command succeeded".to_owned()]);
    }

    #[test]
    fn error_envelope_collects_lines() {
        let body = r#"<?xml version="1.0"?>
<response status="error" code="12">
  <msg>
    <line>sdwan.1 cannot be deleted because of references from:</line>
    <line><![CDATA[ -> vsys -> vsys1 -> zone -> untrust ]]></line>
  </msg>
</response>"#;

        match interpret(body) {
            Err(Error::Device { code, lines }) => {
                assert_eq!(code.as_deref(), Some("12"));
                assert_eq!(
                    lines,
                    vec![
                        "sdwan.1 cannot be deleted because of references from:".to_owned(),
                        "-> vsys -> vsys1 -> zone -> untrust".to_owned(),
                    ]
                );
            }
            other => panic!("expected device error, got {other:?}"),
        }
    }

    #[test]
    fn msg_text_around_lines_is_kept() {
        let env = parse_envelope(
            r#"<response status="error" code="12"><msg>lead text<line>detail</line>tail</msg></response>"#,
        )
        .unwrap();
        assert_eq!(
            env.lines,
            vec!["lead text".to_owned(), "detail".to_owned(), "tail".to_owned()]
        );
    }

    #[test]
    fn self_closing_envelope() {
        let env = parse_envelope(r#"<response status="success"/>"#).unwrap();
        assert_eq!(env.status, Status::Success);
        assert!(env.lines.is_empty());
    }

    #[test]
    fn non_xml_body_is_deserialization_error_with_body() {
        match parse_envelope("Not Found") {
            Err(Error::Deserialization { body, .. }) => assert_eq!(body, "Not Found"),
            other => panic!("expected deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_root_is_rejected() {
        let result = parse_envelope("<html><body>gateway</body></html>");
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }

    #[test]
    fn truncated_document_is_rejected() {
        let result = parse_envelope(r#"<response status="success"><result>"#);
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }

    #[test]
    fn get_maps_code_seven_to_none() {
        let none: Option<SdwanUnitResult> =
            interpret_get(r#"<response status="success" code="7"><result/></response>"#).unwrap();
        assert!(none.is_none());

        let none: Option<SdwanUnitResult> = interpret_get(
            r#"<response status="error" code="7"><msg><line>No such node</line></msg></response>"#,
        )
        .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn get_decodes_result_payload() {
        let body = r#"<response status="success" code="19">
  <result total-count="1" count="1">
    <layer3><member>ethernet1/1</member><member>sdwan.1</member></layer3>
  </result>
</response>"#;

        #[derive(serde::Deserialize)]
        struct Zone {
            layer3: MemberList,
        }

        let zone: Zone = interpret_get(body).unwrap().unwrap();
        assert_eq!(zone.layer3.member, vec!["ethernet1/1", "sdwan.1"]);
    }

    #[test]
    fn get_surfaces_other_errors() {
        let result: Result<Option<SdwanUnitResult>, _> = interpret_get(
            r#"<response status="error" code="13"><msg><line>Invalid xpath</line></msg></response>"#,
        );
        assert!(matches!(result, Err(Error::Device { .. })));
    }
}
