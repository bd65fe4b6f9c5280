//! HTTP routing configuration.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    create_customer_handler, health_check_handler, list_customers_handler, liveness_handler,
    metrics_handler, readiness_handler,
};

/// Builds the application router.
///
/// `/metrics` is only mounted when the state carries a Prometheus handle.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let customer_routes = Router::new().route(
        "/",
        get(list_customers_handler).post(create_customer_handler),
    );

    let health_routes = Router::new()
        .route("/", get(health_check_handler))
        .route("/live", get(liveness_handler))
        .route("/ready", get(readiness_handler));

    let mut router = Router::new()
        .nest("/customers", customer_routes)
        .nest("/health", health_routes);

    if app_state.metrics.is_some() {
        router = router.route("/metrics", get(metrics_handler));
    }

    router.layer(middleware).with_state(app_state)
}
