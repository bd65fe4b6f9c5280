//! Environment-derived configuration, read once at process start.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use sqlx::postgres::PgSslMode;

use crate::domain::ConfigError;
use crate::infra::PostgresConfig;
use crate::infra::observability::LogFormat;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
pub const DEFAULT_TOKEN_ISSUER: &str = "customer-service";

/// Connection parameters for the customer store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub timezone: Option<String>,
    pub pool: PostgresConfig,
}

/// Token signing parameters.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: SecretString,
    pub issuer: String,
}

/// Listen address. `host` may be an IP literal or a resolvable name.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Address in the form accepted by `TcpListener::bind`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let mut pool = PostgresConfig::default();
        if let Some(max) = parse_optional::<u32>(&lookup, "DB_MAX_CONNECTIONS")? {
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "DB_MAX_CONNECTIONS".to_string(),
                    message: "pool size must be at least 1".to_string(),
                });
            }
            pool.max_connections = max;
            pool.min_connections = pool.min_connections.min(max);
        }

        let database = DatabaseConfig {
            host: required("POSTGRES_HOST")?,
            port: parse_optional(&lookup, "POSTGRES_PORT")?.unwrap_or(DEFAULT_POSTGRES_PORT),
            user: required("POSTGRES_USER")?,
            password: SecretString::from(required("POSTGRES_PASSWORD")?),
            name: required("POSTGRES_DB")?,
            ssl_mode: parse_optional(&lookup, "POSTGRES_SSLMODE")?.unwrap_or(PgSslMode::Require),
            timezone: lookup("POSTGRES_TIMEZONE").filter(|v| !v.is_empty()),
            pool,
        };

        let token = TokenConfig {
            secret: SecretString::from(lookup("JWT_SECRET").unwrap_or_default()),
            issuer: lookup("JWT_ISSUER")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string()),
        };

        let server = ServerConfig {
            host: lookup("HOST")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_optional(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            server,
            database,
            token,
            log_format: parse_optional(&lookup, "LOG_FORMAT")?.unwrap_or_default(),
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}
