use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{AdminError, AdminResult};

/// Claims of the token handed to the dashboard after login. It only names a
/// session; the upstream token never leaves this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenVerification {
    Ok(SessionClaims),
    Expired(SessionClaims),
    Error,
}

#[derive(Clone)]
pub struct TokenSigner {
    key: Hmac<Sha256>,
    ttl: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: i64) -> AdminResult<Self> {
        let key = Hmac::new_from_slice(secret.as_bytes())
            .map_err(|e| AdminError::Internal(format!("invalid token secret: {e}")))?;
        Ok(Self { key, ttl: ttl_secs })
    }

    /// When a token issued at `now` stops being valid
    pub fn expiry(&self, now: i64) -> i64 {
        now + self.ttl
    }

    pub fn sign(&self, sid: &str, now: i64) -> AdminResult<String> {
        let claims = SessionClaims {
            sid: sid.to_owned(),
            iat: now,
            exp: self.expiry(now),
        };
        Ok(claims.sign_with_key(&self.key)?)
    }

    pub fn verify(&self, token: &str, now: i64) -> TokenVerification {
        let claims: SessionClaims = match token.verify_with_key(&self.key) {
            Ok(claims) => claims,
            Err(_) => return TokenVerification::Error,
        };
        if claims.exp <= now {
            TokenVerification::Expired(claims)
        } else {
            TokenVerification::Ok(claims)
        }
    }
}
