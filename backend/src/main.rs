//! Courses API entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{OptionExt, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use courses_api::inbound::http::health::HealthState;
use courses_api::outbound::persistence::{DbPool, run_pending_migrations};
use courses_api::settings::ServerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = resolve_bind_addr(&settings)?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations() {
                let url = pool_config.database_url().to_owned();
                let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                    .await
                    .wrap_err("migration task panicked")??;
                info!(applied, "database migrations complete");
            }
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; courses are kept in memory"),
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(initialize_metrics(|| {
            PrometheusMetricsBuilder::new("courses")
                .endpoint("/metrics")
                .build()
        }));
    }

    info!(%bind_addr, "starting courses api");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await?;
    Ok(())
}

fn resolve_bind_addr(settings: &ServerSettings) -> color_eyre::Result<SocketAddr> {
    (settings.host(), settings.port())
        .to_socket_addrs()
        .wrap_err("invalid bind address")?
        .next()
        .ok_or_eyre("bind address resolved to nothing")
}

/// Build Prometheus metrics, logging and disabling them when the builder fails.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}
