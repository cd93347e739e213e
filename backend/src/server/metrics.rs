//! Optional Prometheus metrics middleware.
//!
//! The registry is built once at startup. When that fails the server keeps
//! running with a pass-through layer of the same service type, so the app
//! factory does not need two shapes.

use std::fmt::Display;
use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Namespace prefixed to every exported metric.
pub(crate) const METRICS_NAMESPACE: &str = "qna";
/// Path serving the Prometheus text exposition.
pub(crate) const METRICS_ENDPOINT: &str = "/metrics";

/// Build Prometheus middleware, logging and discarding failures.
pub(crate) fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without them");
            None
        }
    }
}

/// Default Prometheus middleware for this service.
pub(crate) fn default_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint(METRICS_ENDPOINT)
            .build()
    })
}

type BoxedMetricsService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

/// Prometheus middleware or a body-boxing pass-through.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Prometheus(Arc<PrometheusMetrics>),
    Passthrough,
}

impl From<Option<PrometheusMetrics>> for MetricsLayer {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Passthrough, |metrics| Self::Prometheus(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedMetricsService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let layer = self.clone();
        Box::pin(async move {
            match layer {
                Self::Prometheus(metrics) => {
                    let wrapped = Compat::new((*metrics).clone()).new_transform(service).await?;
                    Ok(boxed::service(wrapped))
                }
                Self::Passthrough => Ok(boxed::service(
                    service.map(|res: ServiceResponse<B>| res.map_into_boxed_body()),
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Metrics layer coverage.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    fn initialize_metrics_returns_none_on_error() {
        let metrics = initialize_metrics(|| -> Result<PrometheusMetrics, &str> { Err("boom") });
        assert!(metrics.is_none());
    }

    #[rstest]
    fn initialize_metrics_returns_metrics_on_success() {
        let metrics = initialize_metrics(|| PrometheusMetricsBuilder::new("test").build());
        assert!(metrics.is_some());
    }

    #[rstest]
    #[case(false, StatusCode::NOT_FOUND)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn metrics_endpoint_follows_layer(#[case] enabled: bool, #[case] expected: StatusCode) {
        let metrics = enabled
            .then(|| {
                PrometheusMetricsBuilder::new("layer_test")
                    .endpoint(METRICS_ENDPOINT)
                    .build()
                    .ok()
            })
            .flatten();
        let app = actix_test::init_service(
            App::new()
                .wrap(MetricsLayer::from(metrics))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let ping = actix_test::TestRequest::get().uri("/ping").to_request();
        assert_eq!(actix_test::call_service(&app, ping).await.status(), StatusCode::OK);

        let scrape = actix_test::TestRequest::get().uri(METRICS_ENDPOINT).to_request();
        assert_eq!(actix_test::call_service(&app, scrape).await.status(), expected);
    }
}
