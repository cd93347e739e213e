//! Backend entry-point: loads settings, prepares the database and serves the
//! question and answer API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::{AppSettings, Environment};
use backend::domain::QaService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselQuestionRepository, PoolConfig, run_migrations,
};
use server::{ServerConfig, create_server};

fn init_tracing(environment: Environment) {
    let default_level = match environment {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = fmt().with_env_filter(filter);
    let result = match environment {
        Environment::Local => builder.pretty().try_init(),
        Environment::Dev | Environment::Prod => builder.json().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings =
        AppSettings::load_from_args(std::env::args_os()).wrap_err("loading configuration")?;
    settings.validate().wrap_err("validating configuration")?;
    let environment = settings.environment()?;
    init_tracing(environment);
    info!(env = environment.as_str(), address = settings.address(), "starting");

    let dsn = settings.dsn();
    if settings.run_migrations() {
        run_migrations(&dsn).await.wrap_err("applying migrations")?;
    }
    let pool = DbPool::new(PoolConfig::new(dsn).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("building database pool")?;
    pool.ping().await.wrap_err("connecting to database")?;

    let service = Arc::new(QaService::new(
        Arc::new(DieselQuestionRepository::new(pool.clone())),
        Arc::new(DieselAnswerRepository::new(pool)),
        Arc::new(DefaultClock),
    ));
    let http_state = web::Data::new(HttpState::new(service.clone(), service));
    let health_state = web::Data::new(HealthState::new());

    let config = ServerConfig::new(settings.bind_addr()?)
        .with_request_timeout(settings.request_timeout())
        .with_idle_timeout(settings.idle_timeout());
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    let server = create_server(health_state.clone(), http_state, config)
        .wrap_err("starting HTTP server")?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("serving HTTP")?;
    info!("server stopped");
    Ok(())
}
