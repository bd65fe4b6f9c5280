//! Customer Service
//!
//! An HTTP service that registers customers and issues signed session
//! tokens keyed by a CPF lookup, built on trait-based abstraction and
//! dependency injection.
//!
//! # Layers
//!
//! ```text
//! HTTP request
//!   -> api::handlers      decode, validate, map errors to status codes
//!   -> app::usecases      CreateCustomer / ListCustomer
//!   -> domain::traits     CustomerRepository, TokenIssuer, CustomerStore
//!   -> infra              StoreCustomerRepository, PostgresStore, JwtTokenIssuer
//! ```
//!
//! Every component receives its collaborators as `Arc<dyn Trait>`, so the
//! in-memory doubles in `test_utils` (behind the `test-utils` feature) replace Postgres in tests.
//!
//! # Token issuance
//!
//! `GET /customers?cpf=` always answers with a token when signing works.
//! A CPF that matches a customer yields a token carrying its `customerId`;
//! an empty CPF, an unknown CPF or a failed lookup yields an anonymous token.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use customer_service::api::create_router;
//! use customer_service::app::AppState;
//! use customer_service::config::AppConfig;
//! use customer_service::infra::{JwtTokenIssuer, PostgresStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!
//!     let store = Arc::new(PostgresStore::connect(&config.database).await?);
//!     store.auto_migrate().await?;
//!     let issuer = Arc::new(JwtTokenIssuer::from_config(&config.token));
//!
//!     let state = Arc::new(AppState::new(store, issuer));
//!     let router = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
