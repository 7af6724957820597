//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use dg_api::AppState;
use dg_core::domain::{OutboundCall, RawUpstreamReply};
use dg_core::errors::{GatewayError, GatewayResult};
use dg_core::services::{GatewayService, UpstreamClient};
use dg_infra::Providers;
use dg_shared::ProvidersConfig;

pub const PAYLOAD_LIMIT: usize = 1024 * 1024;

/// Transport that records every call and answers with a canned result
pub struct RecordingClient {
    calls: Mutex<Vec<OutboundCall>>,
    reply: GatewayResult<RawUpstreamReply>,
}

impl RecordingClient {
    pub fn replying(status: u16, content_type: &str, body: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(RawUpstreamReply::new(status, Some(content_type.to_string()), body)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(GatewayError::unreachable("connection refused")),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<OutboundCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl UpstreamClient for RecordingClient {
    async fn issue(&self, call: &OutboundCall) -> GatewayResult<RawUpstreamReply> {
        self.calls.lock().unwrap().push(call.clone());
        self.reply.clone()
    }
}

pub fn app_state(client: Arc<RecordingClient>) -> web::Data<AppState<RecordingClient>> {
    let providers = Providers::from_config(&ProvidersConfig::default()).unwrap();
    web::Data::new(AppState::new(GatewayService::new(client), providers))
}
