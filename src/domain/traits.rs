//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::{CustomerError, DatabaseError, TokenError};
use super::types::{Customer, CustomerField, CustomerId, CustomerRecord, NewCustomer, NewCustomerRecord};

/// Persistence gateway over the relational store.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Check store connectivity
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Insert one row and return it with the storage-assigned columns populated
    async fn create(&self, record: NewCustomerRecord) -> Result<CustomerRecord, DatabaseError>;

    /// Return the first row whose `field` equals `value`
    async fn find_first(
        &self,
        field: CustomerField,
        value: &str,
    ) -> Result<CustomerRecord, DatabaseError>;
}

/// Customer persistence in domain terms.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerError>;

    /// Find a customer by CPF; store errors are returned unchanged
    async fn find_first_by_cpf(&self, cpf: &str) -> Result<Customer, DatabaseError>;
}

/// Issues signed session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Sign a token bound to `customer_id`, or an anonymous one when `None`
    fn generate_token(&self, customer_id: Option<CustomerId>) -> Result<String, TokenError>;
}
