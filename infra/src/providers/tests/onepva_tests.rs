//! Tests for the onepva adapter

use serde_json::json;

use dg_core::domain::{CallBody, ProviderId, ProvisionRequest};
use dg_core::services::ProviderAdapter;
use dg_shared::ProvidersConfig;

use super::parsed;
use crate::providers::onepva::FIELDS_REQUIRED;
use crate::providers::OnePvaAdapter;

fn adapter() -> OnePvaAdapter {
    OnePvaAdapter::from_config(&ProvidersConfig::default()).unwrap()
}

fn request() -> ProvisionRequest {
    ProvisionRequest::new(ProviderId::OnePva, "TJ-992", "tok&en")
        .with_app("whatsapp")
        .with_code("992")
}

#[test]
fn test_every_field_is_required() {
    let adapter = adapter();
    let without_code = ProvisionRequest::new(ProviderId::OnePva, "TJ-992", "token").with_app("whatsapp");
    let without_app = ProvisionRequest::new(ProviderId::OnePva, "TJ-992", "token").with_code("992");
    let without_token = ProvisionRequest::new(ProviderId::OnePva, "TJ-992", "")
        .with_app("whatsapp")
        .with_code("992");

    for request in [without_code, without_app, without_token] {
        let err = adapter.validate(&request).unwrap_err();
        assert_eq!(err.to_string(), FIELDS_REQUIRED);
    }
    assert!(adapter.validate(&request()).is_ok());
}

#[test]
fn test_call_is_encoded_get() {
    let call = adapter().build_call(&request()).unwrap();

    assert_eq!(call.method(), "GET");
    assert_eq!(
        call.url(),
        "https://onepva.com/api/sms/?app=whatsapp&country=TJ-992&auth-token=tok%26en&code=992"
    );
    assert_eq!(call.body(), &CallBody::Empty);
    assert!(!call.include_credentials());
}

#[test]
fn test_credential_travels_in_cookie() {
    let call = adapter().build_call(&request()).unwrap();

    assert_eq!(call.header("cookie"), Some("authToken=tok&en; authRole=Normal"));
    assert_eq!(call.header("referer"), Some("https://onepva.com/"));
    assert!(!call.has_header("origin"));
}

#[test]
fn test_reply_shaping() {
    let adapter = adapter();
    let request = request();
    let call = adapter.build_call(&request).unwrap();

    // mislabelled content type is still decoded
    let ok = parsed("text/html", r#"{"meta":200,"data":{"did":"+992901234567"}}"#, adapter.parse_policy());
    assert_eq!(
        adapter.shape_reply(ok, &request, &call),
        json!({"full": "+992901234567", "plus": "992901234567", "national": "901234567"})
    );

    let other = parsed("application/json", r#"{"meta":500,"message":"no numbers"}"#, adapter.parse_policy());
    assert_eq!(
        adapter.shape_reply(other, &request, &call),
        json!({"meta": 500, "message": "no numbers"})
    );

    let broken = parsed("application/json", "<html>", adapter.parse_policy());
    assert_eq!(
        adapter.shape_reply(broken, &request, &call),
        json!({"error": "Failed to process response", "message": "<html>"})
    );
}
