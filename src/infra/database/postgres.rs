//! PostgreSQL implementation of the customer store.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{
    PgPool, Row,
    postgres::{PgConnectOptions, PgPoolOptions, PgRow},
};
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::DatabaseConfig;
use crate::domain::{CustomerField, CustomerRecord, CustomerStore, DatabaseError, NewCustomerRecord};

const CREATE_CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id         BIGSERIAL PRIMARY KEY,
        name       TEXT NOT NULL,
        cpf        TEXT NOT NULL,
        email      TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT customers_cpf_key UNIQUE (cpf)
    )
"#;

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Customer store backed by a PostgreSQL connection pool
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect using discrete connection parameters
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(config.password.expose_secret())
            .database(&config.name)
            .ssl_mode(config.ssl_mode);
        if let Some(timezone) = &config.timezone {
            options = options.options([("TimeZone", timezone.as_str())]);
        }

        info!(host = %config.host, database = %config.name, "Connecting to PostgreSQL...");
        let pool = Self::pool_options(&config.pool)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    fn pool_options(config: &PostgresConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
    }

    /// Create the `customers` table if it does not exist yet
    pub async fn auto_migrate(&self) -> Result<(), DatabaseError> {
        info!("Ensuring customers table exists...");
        sqlx::query(CREATE_CUSTOMERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        Ok(())
    }

    fn row_to_record(row: &PgRow) -> Result<CustomerRecord, DatabaseError> {
        let column = |e: sqlx::Error| DatabaseError::Query(e.to_string());
        Ok(CustomerRecord {
            id: row.try_get("id").map_err(column)?,
            name: row.try_get("name").map_err(column)?,
            cpf: row.try_get("cpf").map_err(column)?,
            email: row.try_get("email").map_err(column)?,
            created_at: row.try_get("created_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl CustomerStore for PostgresStore {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, record))]
    async fn create(&self, record: NewCustomerRecord) -> Result<CustomerRecord, DatabaseError> {
        let row = sqlx::query(
            r#"
            INSERT INTO customers (name, cpf, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, cpf, email, created_at
            "#,
        )
        .bind(&record.name)
        .bind(&record.cpf)
        .bind(&record.email)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Self::row_to_record(&row)
    }

    #[instrument(skip(self, value), fields(field = field.column()))]
    async fn find_first(
        &self,
        field: CustomerField,
        value: &str,
    ) -> Result<CustomerRecord, DatabaseError> {
        let sql = format!(
            "SELECT id, name, cpf, email, created_at FROM customers WHERE {} = $1 ORDER BY id LIMIT 1",
            field.column()
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        match row {
            Some(row) => Self::row_to_record(&row),
            None => Err(DatabaseError::NotFound(format!(
                "no customer matches {}",
                field.column()
            ))),
        }
    }
}
