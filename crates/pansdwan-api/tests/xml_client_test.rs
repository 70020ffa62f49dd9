#![allow(clippy::unwrap_used)]
// Integration tests for `XmlApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pansdwan_api::{Error, XmlApiClient, xpath};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, XmlApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = XmlApiClient::with_client(reqwest::Client::new(), base_url)
        .with_api_key(SecretString::from("test-key".to_owned()));
    (server, client)
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "application/xml")
}

const SUCCESS: &str = r#"<response status="success" code="20"><msg>command succeeded</msg></response>"#;

// ── Keygen ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_keygen_success() {
    let server = MockServer::start().await;
    let client = XmlApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "keygen"))
        .and(query_param("user", "admin"))
        .and(query_param("password", "p@ss word&"))
        .respond_with(xml(
            r#"<response status="success"><result><key>LUFRPT1key==</key></result></response>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let password = SecretString::from("p@ss word&".to_owned());
    let key = client.keygen("admin", &password).await.unwrap();
    assert_eq!(key.expose_secret(), "LUFRPT1key==");
}

#[tokio::test]
async fn test_keygen_missing_key() {
    let server = MockServer::start().await;
    let client = XmlApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(query_param("type", "keygen"))
        .respond_with(xml(r#"<response status="success"><result><key></key></result></response>"#))
        .mount(&server)
        .await;

    let password = SecretString::from("secret".to_owned());
    match client.keygen("admin", &password).await {
        Err(Error::Authentication { message }) => assert!(message.contains("not found")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_keygen_rejection_never_leaks_password() {
    let server = MockServer::start().await;
    let client = XmlApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(query_param("type", "keygen"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"<response status="error" code="403"><result><msg>Invalid Credential</msg></result></response>"#,
        ))
        .mount(&server)
        .await;

    let password = SecretString::from("hunter2-very-secret".to_owned());
    let err = client.keygen("admin", &password).await.unwrap_err();

    assert!(matches!(err, Error::Authentication { .. }), "got: {err:?}");
    let text = err.to_string();
    assert!(text.contains("Invalid Credential"), "got: {text}");
    assert!(!text.contains("hunter2"), "password leaked: {text}");
}

#[tokio::test]
async fn test_keygen_non_200_html_is_not_decoded() {
    let server = MockServer::start().await;
    let client = XmlApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(query_param("type", "keygen"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html><body>Bad Gateway"))
        .mount(&server)
        .await;

    let password = SecretString::from("secret".to_owned());
    match client.keygen("admin", &password).await {
        Err(Error::Authentication { message }) => {
            assert!(message.contains("HTTP 502"), "got: {message}");
            assert!(message.contains("Bad Gateway"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_keygen_transport_error_has_no_url() {
    // Nothing listens on port 9 of the loopback interface.
    let client = XmlApiClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
    );

    let password = SecretString::from("hunter2-very-secret".to_owned());
    let err = client.keygen("admin", &password).await.unwrap_err();

    let text = format!("{err} {err:?}");
    assert!(!text.contains("hunter2"), "password leaked: {text}");
}

// ── Config calls ────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_sdwan_unit_sends_key_and_element() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(header("X-PAN-KEY", "test-key"))
        .and(query_param("type", "config"))
        .and(query_param("action", "set"))
        .and(query_param("xpath", xpath::sdwan_unit("branch", "sdwan.901").as_str()))
        .and(query_param(
            "element",
            "<protocol>ipv4</protocol><comment>primary wan</comment>\
             <interface><member>ethernet1/1</member><member>ethernet1/2</member></interface>",
        ))
        .respond_with(xml(SUCCESS))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_sdwan_unit(
            "branch",
            "sdwan.901",
            "ipv4",
            "primary wan",
            &["ethernet1/1", "ethernet1/2"],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_sdwan_unit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get"))
        .and(query_param("xpath", xpath::sdwan_unit("branch", "sdwan.901").as_str()))
        .respond_with(xml(
            r#"<response status="success" code="19"><result total-count="1" count="1">
                 <entry name="sdwan.901">
                   <protocol>ipv4</protocol>
                   <comment>primary wan</comment>
                   <interface><member>ethernet1/2</member><member>ethernet1/1</member></interface>
                 </entry>
               </result></response>"#,
        ))
        .mount(&server)
        .await;

    let entry = client.get_sdwan_unit("branch", "sdwan.901").await.unwrap().unwrap();
    assert_eq!(entry.name, "sdwan.901");
    assert_eq!(entry.interface.member, vec!["ethernet1/2", "ethernet1/1"]);
}

#[tokio::test]
async fn test_get_missing_unit_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get"))
        .respond_with(xml(r#"<response status="success" code="7"><result/></response>"#))
        .mount(&server)
        .await;

    assert!(client.get_sdwan_unit("branch", "nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_zone_layer3() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(query_param("action", "get"))
        .and(query_param("xpath", xpath::zone_layer3("t", "vsys1", "untrust").as_str()))
        .respond_with(xml(
            r#"<response status="success" code="19"><result total-count="1" count="1">
                 <layer3><member>ethernet1/1</member><member>sdwan.1</member></layer3>
               </result></response>"#,
        ))
        .mount(&server)
        .await;

    let members = client.get_zone_layer3("t", "vsys1", "untrust").await.unwrap().unwrap();
    assert_eq!(members.member, vec!["ethernet1/1", "sdwan.1"]);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_device_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(xml(
            r#"<response status="error" code="12"><msg><line>sdwan.1 cannot be deleted because of references from:</line><line> -> virtual-router -> default</line></msg></response>"#,
        ))
        .mount(&server)
        .await;

    match client.delete_sdwan_unit("t", "sdwan.1").await {
        Err(Error::Device { code, lines }) => {
            assert_eq!(code.as_deref(), Some("12"));
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[1], "-> virtual-router -> default");
        }
        other => panic!("expected Device error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_is_not_decoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&server)
        .await;

    match client.get_sdwan_unit("t", "sdwan.1").await {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "404 page not found");
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance mode"))
        .mount(&server)
        .await;

    match client.remove_interface_from_vsys("t", "vsys1", "sdwan.1").await {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "maintenance mode"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_config_call_without_key_fails_before_sending() {
    let server = MockServer::start().await;
    let client = XmlApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .respond_with(xml(SUCCESS))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.delete_sdwan_unit("t", "sdwan.1").await;
    assert!(matches!(result, Err(Error::Authentication { .. })), "got: {result:?}");
}
