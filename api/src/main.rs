use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use dg_api::{create_app, AppState};
use dg_core::services::GatewayService;
use dg_infra::{Providers, ReqwestUpstreamClient};
use dg_shared::telemetry::init_tracing;
use dg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env, then config.<env>.toml, then GATEWAY__* variables
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.logging).context("failed to initialize tracing")?;

    info!(
        environment = %config.environment,
        bind_address = %config.server.bind_address(),
        "Starting DID gateway"
    );

    let client = ReqwestUpstreamClient::new(&config.upstream)
        .context("failed to build upstream client")?;
    let providers =
        Providers::from_config(&config.providers).context("failed to configure providers")?;

    let app_state = web::Data::new(AppState::new(
        GatewayService::new(Arc::new(client)),
        providers,
    ));
    let payload_limit = config.server.max_payload_size;

    let mut server = HttpServer::new(move || create_app(app_state.clone(), payload_limit))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    info!("DID gateway stopped");
    Ok(())
}
