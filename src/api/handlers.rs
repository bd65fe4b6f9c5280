//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;
use validator::Validate;

use crate::app::AppState;
use crate::domain::{
    AppError, CreateCustomerRequest, Customer, ErrorResponse, HealthResponse, HealthStatus,
    ListCustomerQuery, ValidationError,
};

/// `GET /customers?cpf=`
///
/// Responds with a signed session token as a JSON string. The token is
/// anonymous unless `cpf` names an existing customer.
pub async fn list_customers_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListCustomerQuery>, QueryRejection>,
) -> Result<Json<String>, AppError> {
    let Query(params) =
        query.map_err(|rejection| ValidationError::InvalidQuery(rejection.body_text()))?;
    params.validate()?;

    let token = state.list_customer.execute(&params.cpf).await?;
    Ok(Json(token))
}

/// `POST /customers`
pub async fn create_customer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let Json(payload) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    payload.validate()?;

    let customer = state.create_customer.execute(&payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Detailed health check
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.health_check().await;
    Json(health)
}

/// Kubernetes liveness probe
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.health_check().await;
    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Prometheus scrape endpoint. Only routed when a recorder is installed.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Customer(_) => (StatusCode::INTERNAL_SERVER_ERROR, "customer_error"),
            AppError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "token_error"),
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
