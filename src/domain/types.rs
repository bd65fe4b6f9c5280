use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Storage-assigned customer identifier.
pub type CustomerId = i64;

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Core domain entity representing a registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A customer that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub cpf: String,
    pub email: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, cpf: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpf: cpf.into(),
            email: email.into(),
        }
    }
}

impl From<&CreateCustomerRequest> for NewCustomer {
    fn from(request: &CreateCustomerRequest) -> Self {
        Self::new(&request.name, &request.cpf, &request.email)
    }
}

/// Request payload for `POST /customers`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl CreateCustomerRequest {
    pub fn new(name: impl Into<String>, cpf: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpf: cpf.into(),
            email: email.into(),
        }
    }
}

/// Query string for `GET /customers`. An empty `cpf` means "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListCustomerQuery {
    #[serde(default)]
    #[validate(custom(function = "validate_cpf_filter"))]
    pub cpf: String,
}

/// Accepts exactly [`CPF_LENGTH`] ASCII digits.
pub fn validate_cpf(cpf: &str) -> Result<(), validator::ValidationError> {
    if cpf.len() == CPF_LENGTH && cpf.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    Err(validator::ValidationError::new("cpf")
        .with_message(Cow::Borrowed("cpf must contain exactly 11 digits")))
}

fn validate_cpf_filter(cpf: &str) -> Result<(), validator::ValidationError> {
    if cpf.is_empty() {
        return Ok(());
    }
    validate_cpf(cpf)
}

/// Columns the persistence gateway may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Cpf,
    Email,
}

impl CustomerField {
    pub fn column(self) -> &'static str {
        match self {
            CustomerField::Cpf => "cpf",
            CustomerField::Email => "email",
        }
    }
}

/// Row shape written to the customer store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerRecord {
    pub name: String,
    pub cpf: String,
    pub email: String,
}

/// Row shape read back from the customer store, with storage-assigned columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Claims carried by an issued session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Absent for anonymous sessions.
    #[serde(rename = "customerId", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub iss: String,
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_anonymous(&self) -> bool {
        self.customer_id.is_none()
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check status for services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(database: HealthStatus) -> Self {
        Self {
            status: database.clone(),
            database,
            timestamp: Utc::now(),
        }
    }
}
