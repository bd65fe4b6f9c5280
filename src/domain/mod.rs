//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    AppError, ConfigError, CustomerError, DatabaseError, TokenError, UNIQUE_VIOLATION_CODE,
    ValidationError,
};
pub use traits::{CustomerRepository, CustomerStore, TokenIssuer};
pub use types::{
    CPF_LENGTH, CreateCustomerRequest, Customer, CustomerField, CustomerId, CustomerRecord,
    ErrorResponse, HealthResponse, HealthStatus, ListCustomerQuery, NewCustomer,
    NewCustomerRecord, TokenClaims, validate_cpf,
};
