//! Session token issuers.

pub mod jwt;

pub use jwt::{JwtTokenIssuer, TOKEN_TTL_HOURS};
