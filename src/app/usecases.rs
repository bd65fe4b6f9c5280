//! Customer use cases.
//!
//! Both use cases hold trait objects only, so handlers and tests can wire
//! them to any repository or token issuer.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{
    CreateCustomerRequest, Customer, CustomerError, CustomerRepository, NewCustomer, TokenError,
    TokenIssuer,
};
use crate::infra::observability::{CUSTOMER_CREATION_FAILURES, CUSTOMERS_CREATED, TOKENS_ISSUED};

/// Persists a new customer from an already validated request.
pub struct CreateCustomerUseCase {
    repository: Arc<dyn CustomerRepository>,
}

impl CreateCustomerUseCase {
    #[must_use]
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Creates the customer and returns it with its storage-assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Propagates the repository's [`CustomerError`] unchanged.
    #[instrument(skip(self, input), fields(customer_name = %input.name))]
    pub async fn execute(&self, input: &CreateCustomerRequest) -> Result<Customer, CustomerError> {
        let customer = NewCustomer::from(input);

        match self.repository.create(&customer).await {
            Ok(created) => {
                metrics::counter!(CUSTOMERS_CREATED).increment(1);
                info!(customer_id = created.id, "Customer created");
                Ok(created)
            }
            Err(e) => {
                let reason = match e {
                    CustomerError::Duplicate => "duplicate",
                    CustomerError::UnknownCreation => "unknown",
                };
                metrics::counter!(CUSTOMER_CREATION_FAILURES, "reason" => reason).increment(1);
                Err(e)
            }
        }
    }
}

/// Issues a session token, bound to the customer owning the given CPF when one exists.
///
/// Lookup failures never reach the caller: a missing customer or a store
/// error both degrade to an anonymous token. Only a signing failure is
/// returned as an error.
pub struct ListCustomerUseCase {
    repository: Arc<dyn CustomerRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl ListCustomerUseCase {
    #[must_use]
    pub fn new(repository: Arc<dyn CustomerRepository>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            repository,
            token_issuer,
        }
    }

    /// An empty `cpf` skips the lookup entirely.
    #[instrument(skip(self, cpf))]
    pub async fn execute(&self, cpf: &str) -> Result<String, TokenError> {
        if cpf.is_empty() {
            return self.issue(None);
        }

        match self.repository.find_first_by_cpf(cpf).await {
            Ok(customer) => {
                info!(customer_id = customer.id, "Issuing token for customer");
                self.issue(Some(customer.id))
            }
            Err(e) => {
                warn!(error = %e, "Customer lookup failed, issuing anonymous token");
                self.issue(None)
            }
        }
    }

    fn issue(&self, customer_id: Option<i64>) -> Result<String, TokenError> {
        let token = self.token_issuer.generate_token(customer_id)?;
        let kind = if customer_id.is_some() { "customer" } else { "anonymous" };
        metrics::counter!(TOKENS_ISSUED, "kind" => kind).increment(1);
        Ok(token)
    }
}
