//! Form extraction for the provider routes
//!
//! Browser clients post these forms either urlencoded or as
//! `multipart/form-data`; both decode into the same DTO. Urlencoded bodies go
//! through `web::Form` and its `FormConfig`.

use actix_multipart::{Multipart, MultipartError};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::unreadable_form;

const DEFAULT_MULTIPART_LIMIT: usize = 256 * 1024;

/// Size limit for multipart form bodies
#[derive(Debug, Clone, Copy)]
pub struct MultipartFormConfig {
    limit: usize,
}

impl MultipartFormConfig {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for MultipartFormConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MULTIPART_LIMIT)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormBodyError {
    #[error("malformed multipart body: {0}")]
    Multipart(MultipartError),

    #[error("multipart body exceeds {0} bytes")]
    Overflow(usize),

    #[error("form fields do not decode: {0}")]
    Fields(#[from] serde_json::Error),
}

/// Form DTO read from a urlencoded or multipart body
#[derive(Debug)]
pub struct ProxyForm<T>(pub T);

impl<T> ProxyForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for ProxyForm<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if !is_multipart(req) {
            let form = web::Form::<T>::from_request(req, payload);
            return Box::pin(async move { form.await.map(|form| ProxyForm(form.into_inner())) });
        }

        let limit = req
            .app_data::<MultipartFormConfig>()
            .copied()
            .unwrap_or_default()
            .limit;
        let multipart = Multipart::new(req.headers(), payload.take());
        let path = req.path().to_string();

        Box::pin(async move {
            read_multipart(multipart, limit)
                .await
                .map(ProxyForm)
                .map_err(|err| {
                    warn!(error = %err, path = %path, "unreadable multipart form");
                    InternalError::from_response(err, unreadable_form()).into()
                })
        })
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.content_type().eq_ignore_ascii_case("multipart/form-data")
}

/// Collect every named part as text and decode the result into `T`
async fn read_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
    limit: usize,
) -> Result<T, FormBodyError> {
    let mut fields = Map::new();
    let mut size = 0usize;

    while let Some(mut field) = multipart.try_next().await.map_err(FormBodyError::Multipart)? {
        let name = field.content_disposition().get_name().map(str::to_string);

        let mut value = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(FormBodyError::Multipart)? {
            size += chunk.len();
            if size > limit {
                return Err(FormBodyError::Overflow(limit));
            }
            value.extend_from_slice(&chunk);
        }

        // a repeated name keeps its first value
        if let Some(name) = name {
            fields
                .entry(name)
                .or_insert_with(|| Value::String(String::from_utf8_lossy(&value).into_owned()));
        }
    }

    Ok(serde_json::from_value(Value::Object(fields))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{GetNumberForm, PvaForm};
    use actix_web::test::TestRequest;

    const BOUNDARY: &str = "XB";

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(fields: &[(&str, &str)]) -> TestRequest {
        TestRequest::post()
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(fields))
    }

    #[actix_web::test]
    async fn test_multipart_fields_fill_the_dto() {
        let (req, mut payload) = multipart_request(&[
            ("country", "master--TJ-992"),
            ("carrier", "tcell"),
            ("authKey", "secret"),
        ])
        .to_http_parts();

        let form = ProxyForm::<GetNumberForm>::from_request(&req, &mut payload)
            .await
            .unwrap()
            .into_inner();
        assert_eq!(form.country, "master--TJ-992");
        assert_eq!(form.carrier.as_deref(), Some("tcell"));
        assert_eq!(form.auth_key, "secret");
    }

    #[actix_web::test]
    async fn test_multipart_missing_fields_default_to_empty() {
        let (req, mut payload) = multipart_request(&[("app", "whatsapp"), ("auth-token", "tok")])
            .to_http_parts();

        let form = ProxyForm::<PvaForm>::from_request(&req, &mut payload)
            .await
            .unwrap()
            .into_inner();
        assert_eq!(form.app, "whatsapp");
        assert_eq!(form.auth_token, "tok");
        assert!(form.country.is_empty());
        assert!(form.code.is_empty());
    }

    #[actix_web::test]
    async fn test_urlencoded_body_still_accepted() {
        let (req, mut payload) = TestRequest::post()
            .set_form([("country", "US"), ("authKey", "secret")])
            .to_http_parts();

        let form = ProxyForm::<GetNumberForm>::from_request(&req, &mut payload)
            .await
            .unwrap()
            .into_inner();
        assert_eq!(form.country, "US");
        assert_eq!(form.carrier, None);
    }

    #[actix_web::test]
    async fn test_multipart_over_limit_is_rejected() {
        let long = "x".repeat(64);
        let (req, mut payload) = multipart_request(&[("country", long.as_str())])
            .app_data(MultipartFormConfig::new(16))
            .to_http_parts();

        let result = ProxyForm::<GetNumberForm>::from_request(&req, &mut payload).await;
        let err = result.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 500);
    }
}
