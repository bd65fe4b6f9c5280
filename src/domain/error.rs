//! Application error types with proper error chaining.

use thiserror::Error;

/// Postgres SQLSTATE raised on a unique constraint violation.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query execution failed: {0}")]
    Query(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Failures of the customer creation path, as seen by callers of the repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    #[error("customer already exists")]
    Duplicate,
    #[error("an unknown error occurred while creating the customer")]
    UnknownCreation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
    #[error("Token signing failed: {0}")]
    Signing(String),
    #[error("Invalid token: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Validation failed: {0}")]
    Multiple(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(ValidationError::Multiple(err.to_string()))
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidKeyFormat => TokenError::InvalidKey(err.to_string()),
            _ => TokenError::Signing(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Row not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::Connection("Pool timed out".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| code == UNIQUE_VIOLATION_CODE) {
                    return DatabaseError::Duplicate(db_err.message().to_string());
                }
                DatabaseError::Query(db_err.message().to_string())
            }
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_conversions() {
        let not_found = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(matches!(not_found, DatabaseError::NotFound(_)));

        let pool_timeout = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(pool_timeout, DatabaseError::Connection(_)));

        let generic = DatabaseError::from(sqlx::Error::WorkerCrashed);
        assert!(matches!(generic, DatabaseError::Query(_)));
    }

    #[test]
    fn test_validation_conversion() {
        use validator::Validate;

        #[derive(Validate)]
        struct TestStruct {
            #[validate(length(min = 1))]
            val: String,
        }

        let s = TestStruct {
            val: "".to_string(),
        };
        let err = s.validate().unwrap_err();
        let app_err = AppError::from(err);

        assert!(matches!(
            app_err,
            AppError::Validation(ValidationError::Multiple(_))
        ));
    }

    #[test]
    fn test_customer_error_display() {
        assert_eq!(
            CustomerError::Duplicate.to_string(),
            "customer already exists"
        );
        assert_eq!(
            CustomerError::UnknownCreation.to_string(),
            "an unknown error occurred while creating the customer"
        );
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::Connection("timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: timeout");

        let err = DatabaseError::NotFound("cpf".to_string());
        assert_eq!(err.to_string(), "Record not found: cpf");

        let err = DatabaseError::Duplicate("unique violation".to_string());
        assert_eq!(err.to_string(), "Duplicate record: unique violation");
    }

    #[test]
    fn test_token_error_display() {
        let err = TokenError::InvalidKey("empty".to_string());
        assert_eq!(err.to_string(), "Invalid signing key: empty");

        let err = TokenError::Invalid("expired".to_string());
        assert_eq!(err.to_string(), "Invalid token: expired");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidQuery("cpf: invalid type".to_string());
        assert_eq!(err.to_string(), "Invalid query: cpf: invalid type");

        let err = ValidationError::MalformedBody("expected a string".to_string());
        assert_eq!(err.to_string(), "Malformed request body: expected a string");
    }

    #[test]
    fn test_app_error_is_transparent_for_customer_errors() {
        let app_err: AppError = CustomerError::Duplicate.into();
        assert_eq!(app_err.to_string(), "customer already exists");
        assert!(matches!(app_err, AppError::Customer(CustomerError::Duplicate)));
    }

    #[test]
    fn test_app_error_from_token_error() {
        let app_err: AppError = TokenError::Signing("boom".to_string()).into();
        assert!(matches!(app_err, AppError::Token(TokenError::Signing(_))));
    }
}
