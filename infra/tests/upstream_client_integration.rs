//! Integration tests for the reqwest transport and the provider adapters
//! against a local mock upstream

use std::collections::BTreeMap;
use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use dg_core::domain::{
    AmbientCredentials, CallBody, OutboundCall, PassthroughRequest, ProviderId, ProvisionRequest,
};
use dg_core::errors::GatewayError;
use dg_core::services::{GatewayService, UpstreamClient};
use dg_infra::{Providers, ReqwestUpstreamClient};
use dg_shared::{ProvidersConfig, UpstreamConfig};

fn client() -> ReqwestUpstreamClient {
    ReqwestUpstreamClient::new(&UpstreamConfig::default()).unwrap()
}

fn providers_for(server: &MockServer) -> Providers {
    let config = ProvidersConfig {
        acchub_number_url: server.url("/api/getNumber/"),
        acchub_sms_url: server.url("/api/getSmsNumber/"),
        onepva_url: server.url("/api/sms/"),
        ..ProvidersConfig::default()
    };
    Providers::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_issue_captures_status_content_type_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/status").header("x-probe", "1");
            then.status(418)
                .header("content-type", "text/plain")
                .body("short and stout");
        })
        .await;

    let call = OutboundCall::new("GET", server.url("/status")).with_header("X-Probe", "1");
    let reply = client().issue(&call).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status_code, 418);
    assert_eq!(reply.content_type.as_deref(), Some("text/plain"));
    assert_eq!(reply.body_text, "short and stout");
}

#[tokio::test]
async fn test_form_body_is_sent_as_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/form")
                .header_exists("content-type")
                .body_contains("name=\"app\"")
                .body_contains("master--TJ-992");
            then.status(200).body("{}");
        })
        .await;

    let call = OutboundCall::new("POST", server.url("/form")).with_body(CallBody::Form(vec![(
        "app".to_string(),
        "master--TJ-992".to_string(),
    )]));
    let reply = client().issue(&call).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status_code, 200);
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let call = OutboundCall::new("GET", "http://127.0.0.1:1/");
    let err = client().issue(&call).await.unwrap_err();
    assert!(matches!(err, GatewayError::UpstreamUnreachable { .. }));
}

#[tokio::test]
async fn test_acchub_number_end_to_end() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/getNumber/")
                .header("auth-token", "secret")
                .header("cookie", "sid=abc")
                .body_contains("master--TJ-992");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"meta":200,"data":{"did":"+992901234567"}}"#);
        })
        .await;

    let providers = providers_for(&server);
    let service = GatewayService::new(Arc::new(client()));
    let request = ProvisionRequest::new(ProviderId::AcchubNumber, "master--TJ-992", "secret");
    let ambient = AmbientCredentials {
        cookie: Some("sid=abc".to_string()),
        authorization: None,
    };
    let adapter = providers.provision(ProviderId::AcchubNumber).unwrap();

    let envelope = service.dispatch(adapter, &request, &ambient).await;

    mock.assert_hits_async(1).await;
    assert_eq!(envelope.status_code(), 200);
    assert_eq!(
        envelope.payload(),
        &json!({"full": "+992901234567", "plus": "992901234567", "national": "901234567"})
    );
}

#[tokio::test]
async fn test_onepva_truncated_json_keeps_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/sms/")
                .query_param("app", "whatsapp")
                .query_param("auth-token", "tok")
                .header("cookie", "authToken=tok; authRole=Normal");
            then.status(503).body(r#"{"meta":"#);
        })
        .await;

    let providers = providers_for(&server);
    let service = GatewayService::new(Arc::new(client()));
    let request = ProvisionRequest::new(ProviderId::OnePva, "TJ", "tok")
        .with_app("whatsapp")
        .with_code("992");

    let envelope = service
        .dispatch(&providers.onepva, &request, &AmbientCredentials::default())
        .await;

    mock.assert_async().await;
    assert_eq!(envelope.status_code(), 503);
    assert_eq!(
        envelope.payload(),
        &json!({"error": "Failed to process response", "message": r#"{"meta":"#})
    );
}

#[tokio::test]
async fn test_passthrough_end_to_end() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/things/7").header("x-api-key", "k").body("hello");
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":7,"ok":true}"#);
        })
        .await;

    let providers = providers_for(&server);
    let service = GatewayService::new(Arc::new(client()));
    let mut headers = BTreeMap::new();
    headers.insert("x-api-key".to_string(), "k".to_string());
    let request = PassthroughRequest::new(server.url("/things/7"))
        .with_method("put")
        .with_headers(headers)
        .with_body(Some("hello".to_string()));

    let envelope = service
        .dispatch(&providers.passthrough, &request, &AmbientCredentials::default())
        .await;

    mock.assert_async().await;
    assert_eq!(envelope.status_code(), 201);
    assert_eq!(envelope.payload(), &json!({"id": 7, "ok": true}));
}

#[tokio::test]
async fn test_passthrough_invalid_method_reports_details() {
    let providers = Providers::from_config(&ProvidersConfig::default()).unwrap();
    let service = GatewayService::new(Arc::new(client()));
    let request = PassthroughRequest::new("https://example.com/").with_method("GE T");

    let envelope = service
        .dispatch(&providers.passthrough, &request, &AmbientCredentials::default())
        .await;

    assert_eq!(envelope.status_code(), 500);
    assert_eq!(envelope.payload()["error"], "Failed to process the request");
    assert!(envelope.payload()["details"]
        .as_str()
        .unwrap()
        .starts_with("invalid method"));
}
