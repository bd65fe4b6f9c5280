//! Customer repository over any [`CustomerStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::domain::{
    Customer, CustomerError, CustomerField, CustomerRecord, CustomerRepository, CustomerStore,
    DatabaseError, NewCustomer, NewCustomerRecord,
};

/// Message Postgres attaches to unique constraint violations.
pub const DUPLICATE_KEY_MESSAGE: &str = "duplicate key value violates unique constraint";

/// Translates between domain customers and store records.
pub struct StoreCustomerRepository {
    store: Arc<dyn CustomerStore>,
}

impl StoreCustomerRepository {
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }
}

/// Classifies a failed insert as a CPF conflict or an unknown failure.
///
/// Prefers the structured [`DatabaseError::Duplicate`] signal and falls back
/// to the driver message for stores that only report text.
pub fn classify_creation_error(err: &DatabaseError) -> CustomerError {
    match err {
        DatabaseError::Duplicate(_) => CustomerError::Duplicate,
        other if other.to_string().contains(DUPLICATE_KEY_MESSAGE) => CustomerError::Duplicate,
        _ => CustomerError::UnknownCreation,
    }
}

fn to_record(customer: &NewCustomer) -> NewCustomerRecord {
    NewCustomerRecord {
        name: customer.name.clone(),
        cpf: customer.cpf.clone(),
        email: customer.email.clone(),
    }
}

fn to_domain(record: CustomerRecord) -> Customer {
    Customer {
        id: record.id,
        name: record.name,
        cpf: record.cpf,
        email: record.email,
        created_at: record.created_at,
    }
}

#[async_trait]
impl CustomerRepository for StoreCustomerRepository {
    #[instrument(skip(self, customer))]
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerError> {
        match self.store.create(to_record(customer)).await {
            Ok(record) => Ok(to_domain(record)),
            Err(e) => {
                let classified = classify_creation_error(&e);
                warn!(error = %e, kind = ?classified, "Customer insert failed");
                Err(classified)
            }
        }
    }

    #[instrument(skip(self, cpf))]
    async fn find_first_by_cpf(&self, cpf: &str) -> Result<Customer, DatabaseError> {
        self.store
            .find_first(CustomerField::Cpf, cpf)
            .await
            .map(to_domain)
    }
}
