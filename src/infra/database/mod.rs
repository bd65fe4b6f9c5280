//! Concrete persistence adapters.
//!
//! `PostgresStore` implements the `CustomerStore` gateway; the repository
//! translates between store records and domain customers.

pub mod customer_repository;
pub mod postgres;

pub use customer_repository::{DUPLICATE_KEY_MESSAGE, StoreCustomerRepository, classify_creation_error};
pub use postgres::{PostgresConfig, PostgresStore};
