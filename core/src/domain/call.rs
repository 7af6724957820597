//! Fully resolved outbound calls.

use std::collections::BTreeMap;

use crate::domain::request::AmbientCredentials;

/// Body of an outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallBody {
    Empty,
    /// Raw text sent as-is
    Text(String),
    /// Multipart form fields, in order
    Form(Vec<(String, String)>),
}

impl CallBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CallBody::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The request an adapter hands to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
    body: CallBody,
    include_credentials: bool,
}

impl OutboundCall {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: BTreeMap::new(),
            body: CallBody::Empty,
            include_credentials: false,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    pub fn with_body(mut self, body: CallBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_credentials(mut self, include: bool) -> Self {
        self.include_credentials = include;
        self
    }

    /// Attach the inbound cookie/authorization when credentials are included
    ///
    /// Headers the adapter already set are never overridden.
    pub fn attach_ambient(mut self, ambient: &AmbientCredentials) -> Self {
        if !self.include_credentials {
            return self;
        }
        if let Some(cookie) = &ambient.cookie {
            if !self.has_header("cookie") {
                self.headers.insert("Cookie".to_string(), cookie.clone());
            }
        }
        if let Some(authorization) = &ambient.authorization {
            if !self.has_header("authorization") {
                self.headers
                    .insert("Authorization".to_string(), authorization.clone());
            }
        }
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &CallBody {
        &self.body
    }

    pub fn include_credentials(&self) -> bool {
        self.include_credentials
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Host of the target, safe to log (query strings may carry tokens)
    pub fn target_host(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "<invalid-url>".to_string())
    }
}
