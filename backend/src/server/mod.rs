//! HTTP server assembly for the question and answer API.
//!
//! [`ApiState`] owns the shared handler state and registers the API and the
//! probes on an Actix service config; [`create_server`] applies timeouts and
//! flags readiness once the listener is bound.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
pub(crate) use metrics::default_metrics;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
use backend::inbound::http::health::{self, HealthState};
use backend::inbound::http::routes;
use backend::inbound::http::state::HttpState;

#[cfg(debug_assertions)]
fn register_docs(cfg: &mut web::ServiceConfig) {
    use backend::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
fn register_docs(_cfg: &mut web::ServiceConfig) {}

/// Handler state shared by every worker.
#[derive(Clone)]
struct ApiState {
    health: web::Data<HealthState>,
    http: web::Data<HttpState>,
}

impl ApiState {
    fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.health.clone())
            .app_data(self.http.clone())
            .service(health::ready)
            .service(health::live);
        routes::configure(cfg);
        register_docs(cfg);
    }
}

fn build_app(
    state: ApiState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .configure(move |cfg| state.register(cfg))
}

/// Construct an Actix HTTP server over the given handler state.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    #[cfg(feature = "metrics")]
    let metrics_layer = metrics::MetricsLayer::from(config.prometheus);

    let state = ApiState {
        health: health_state.clone(),
        http: http_state,
    };
    let server = HttpServer::new(move || {
        let app = build_app(state.clone());
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());
        app
    })
    .client_request_timeout(config.request_timeout)
    .client_disconnect_timeout(config.request_timeout)
    .keep_alive(config.idle_timeout)
    .bind(config.bind_addr)?;

    for addr in server.addrs() {
        info!(%addr, "listening");
    }
    let running = server.run();
    health_state.mark_ready();
    Ok(running)
}
