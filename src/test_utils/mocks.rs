//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and edge cases.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::{
    Customer, CustomerError, CustomerField, CustomerRecord, CustomerRepository, CustomerStore,
    DatabaseError, NewCustomer, NewCustomerRecord,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// The customer used across handler and use-case tests.
#[must_use]
pub fn sample_customer() -> Customer {
    Customer {
        id: 1,
        name: "Customer 1".to_string(),
        cpf: "12345678900".to_string(),
        email: "email@email.com".to_string(),
        created_at: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// In-memory customer store.
///
/// Assigns sequential ids, enforces CPF uniqueness the way Postgres does
/// (reporting [`DatabaseError::Duplicate`]) and supports configurable
/// failure modes.
///
/// # Example
///
/// ```ignore
/// use customer_service::test_utils::MockCustomerStore;
///
/// // Create a store that succeeds
/// let store = MockCustomerStore::new();
///
/// // Create a store whose every call fails with the given message
/// let failing = MockCustomerStore::failing("connection reset");
/// ```
pub struct MockCustomerStore {
    rows: Mutex<Vec<CustomerRecord>>,
    next_id: AtomicI64,
    config: MockConfig,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
}

impl MockCustomerStore {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            config,
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails with a query error carrying `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Gets all stored rows.
    pub fn rows(&self) -> Vec<CustomerRecord> {
        self.rows.lock().unwrap().clone()
    }

    fn increment_call_count(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_should_fail(&self) -> Result<(), DatabaseError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(DatabaseError::Query(msg));
        }
        Ok(())
    }
}

impl Default for MockCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MockCustomerStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.increment_call_count();

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            ));
        }

        self.check_should_fail()
    }

    async fn create(&self, record: NewCustomerRecord) -> Result<CustomerRecord, DatabaseError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.cpf == record.cpf) {
            return Err(DatabaseError::Duplicate(
                "duplicate key value violates unique constraint \"customers_cpf_key\"".to_string(),
            ));
        }

        let row = CustomerRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: record.name,
            cpf: record.cpf,
            email: record.email,
            created_at: Utc::now(),
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn find_first(
        &self,
        field: CustomerField,
        value: &str,
    ) -> Result<CustomerRecord, DatabaseError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|row| match field {
                CustomerField::Cpf => row.cpf == value,
                CustomerField::Email => row.email == value,
            })
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("no customer matches {}", field.column())))
    }
}

/// Scriptable customer repository that records how it was called.
///
/// By default `create` echoes the input back as customer `1` created on
/// 2021-01-01, and `find_first_by_cpf` reports not found.
pub struct MockCustomerRepository {
    customer: Option<Customer>,
    create_error: Option<CustomerError>,
    find_error: Option<DatabaseError>,
    create_calls: AtomicU64,
    find_calls: AtomicU64,
    last_cpf: Mutex<Option<String>>,
}

impl MockCustomerRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            customer: None,
            create_error: None,
            find_error: None,
            create_calls: AtomicU64::new(0),
            find_calls: AtomicU64::new(0),
            last_cpf: Mutex::new(None),
        }
    }

    /// `find_first_by_cpf` returns `customer`.
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// `create` fails with `err`.
    #[must_use]
    pub fn with_create_error(mut self, err: CustomerError) -> Self {
        self.create_error = Some(err);
        self
    }

    /// `find_first_by_cpf` fails with `err`.
    #[must_use]
    pub fn with_find_error(mut self, err: DatabaseError) -> Self {
        self.find_error = Some(err);
        self
    }

    pub fn create_calls(&self) -> u64 {
        self.create_calls.load(Ordering::Relaxed)
    }

    pub fn find_calls(&self) -> u64 {
        self.find_calls.load(Ordering::Relaxed)
    }

    /// The CPF passed to the most recent lookup.
    pub fn last_cpf(&self) -> Option<String> {
        self.last_cpf.lock().unwrap().clone()
    }
}

impl Default for MockCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for MockCustomerRepository {
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, CustomerError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }

        Ok(Customer {
            name: customer.name.clone(),
            cpf: customer.cpf.clone(),
            email: customer.email.clone(),
            ..sample_customer()
        })
    }

    async fn find_first_by_cpf(&self, cpf: &str) -> Result<Customer, DatabaseError> {
        self.find_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_cpf.lock().unwrap() = Some(cpf.to_string());

        if let Some(err) = &self.find_error {
            return Err(err.clone());
        }

        self.customer
            .clone()
            .ok_or_else(|| DatabaseError::NotFound("Row not found".to_string()))
    }
}
