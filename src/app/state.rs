//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::{CustomerRepository, CustomerStore, HealthResponse, HealthStatus, TokenIssuer};
use crate::infra::StoreCustomerRepository;
use crate::infra::observability::PrometheusHandle;

use super::usecases::{CreateCustomerUseCase, ListCustomerUseCase};

/// Shared application state for the Axum web server.
///
/// Holds the use cases wired to trait objects, plus the store handle used by
/// the health probes. Everything is behind `Arc` and read-only after
/// construction, so the state is cheap to clone into each request.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(PostgresStore::connect(&config.database).await?);
/// let issuer = Arc::new(JwtTokenIssuer::from_config(&config.token));
/// let state = Arc::new(AppState::new(store, issuer));
/// let router = create_router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    pub create_customer: Arc<CreateCustomerUseCase>,
    pub list_customer: Arc<ListCustomerUseCase>,
    pub store: Arc<dyn CustomerStore>,
    pub metrics: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Creates the state over `store`, wrapping it in a [`StoreCustomerRepository`].
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        let repository = Arc::new(StoreCustomerRepository::new(Arc::clone(&store)));
        Self::with_repository(repository, token_issuer, store)
    }

    /// Creates the state with an explicit repository.
    ///
    /// This is useful for testing when you want to script repository results.
    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn CustomerRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        store: Arc<dyn CustomerStore>,
    ) -> Self {
        Self {
            create_customer: Arc::new(CreateCustomerUseCase::new(Arc::clone(&repository))),
            list_customer: Arc::new(ListCustomerUseCase::new(repository, token_issuer)),
            store,
            metrics: None,
        }
    }

    /// Attaches a Prometheus handle; enables `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: Option<Arc<PrometheusHandle>>) -> Self {
        self.metrics = handle;
        self
    }

    /// Probes the customer store.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let database = match self.store.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                HealthStatus::Unhealthy
            }
        };
        HealthResponse::new(database)
    }
}
