use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Error, Role};

/// How long an issued token stays valid.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaim {
    pub user_id: i32,
    pub email: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

impl TokenClaim {
    pub fn new(user_id: i32, email: &str, role: Role) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email: email.to_owned(),
            role: role.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        }
    }

    /// Signs the claims with HS256.
    pub fn encode(&self, secret: &str) -> Result<String, Error> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_ref()),
        )?;
        Ok(token)
    }

    /// Verifies signature and expiry. Any failure is reported as unauthorized.
    pub fn decode(secret: &str, token: &str) -> Result<TokenClaim, Error> {
        decode::<TokenClaim>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| Error::unauthorized("invalid or expired token"))
    }
}
