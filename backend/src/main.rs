//! Service entry-point: loads settings, connects to MongoDB, and serves the
//! user REST API.

mod server;

use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    ServerConfig, build_health_state, build_http_state, create_server, drain_on_signal,
};
use user_service::outbound::persistence::MongoGateway;
use user_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let gateway = MongoGateway::connect(&settings.gateway_settings()?)
        .await
        .wrap_err("failed to connect to the document store")?;

    let http_state = build_http_state(&gateway, settings.operation_timeout());
    let health_state = build_health_state(&gateway);
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, http_state),
    )?;
    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));

    info!(%bind_addr, "user API listening");
    server.await?;
    Ok(())
}
