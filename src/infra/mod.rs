//! Infrastructure layer implementations.

pub mod database;
pub mod observability;
pub mod token;

pub use database::{PostgresConfig, PostgresStore, StoreCustomerRepository};
pub use token::JwtTokenIssuer;
