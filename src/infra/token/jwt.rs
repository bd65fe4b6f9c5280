//! HMAC-SHA256 JWT session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use crate::config::TokenConfig;
use crate::domain::{CustomerId, TokenClaims, TokenError, TokenIssuer};

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Signs session tokens with a shared secret.
/// The raw secret is exposed only while encoding or decoding.
pub struct JwtTokenIssuer {
    secret: SecretString,
    issuer: String,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: SecretString, issuer: impl Into<String>) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(config.secret.clone(), config.issuer.clone())
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn key_bytes(&self) -> Result<&[u8], TokenError> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Err(TokenError::InvalidKey("signing key is empty".to_string()));
        }
        Ok(secret.as_bytes())
    }

    /// Decodes `token`, checking signature, expiry and issuer.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<TokenClaims>(token, &DecodingKey::from_secret(self.key_bytes()?), &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn generate_token(&self, customer_id: Option<CustomerId>) -> Result<String, TokenError> {
        let claims = TokenClaims {
            customer_id: customer_id.map(|id| id.to_string()),
            iss: self.issuer.clone(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        let key = EncodingKey::from_secret(self.key_bytes()?);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
    }
}
