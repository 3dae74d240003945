//! Session Token
//!
//! HS256 JWT carrying the admin role claim. Expiry is checked against the
//! caller's clock so tests can move time.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role claim carried by every console session
pub const ADMIN_ROLE: &str = "admin";

/// Token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    #[error("signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("role is not admin")]
    WrongRole,

    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::BadSignature,
            JwtErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Session claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Admin claims issued at `now`, valid for `ttl_secs`
    pub fn admin(now: DateTime<Utc>, ttl_secs: i64) -> Self {
        let iat = now.timestamp();
        Self {
            role: ADMIN_ROLE.to_string(),
            iat,
            exp: iat + ttl_secs,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // `exp` must be present; its value is compared with the caller's clock below
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// Sign claims into a compact token
pub fn sign(claims: &SessionClaims, key: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify a compact token and return its claims
pub fn verify(token: &str, key: &[u8], now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
    let claims = decode::<SessionClaims>(token, &DecodingKey::from_secret(key), &validation())?.claims;

    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }
    if claims.role != ADMIN_ROLE {
        return Err(TokenError::WrongRole);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use platform::crypto::to_base64_url;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn epoch(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let now = epoch(1_700_000_000);
        let claims = SessionClaims::admin(now, 7200);
        let token = sign(&claims, KEY).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let verified = verify(&token, KEY, now + Duration::seconds(60)).unwrap();
        assert_eq!(verified, claims);
        assert_eq!(verified.exp - verified.iat, 7200);
    }

    #[test]
    fn test_header_is_hs256() {
        let token = sign(&SessionClaims::admin(epoch(0), 10), KEY).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = epoch(1_000);
        let token = sign(&SessionClaims::admin(now, 100), KEY).unwrap();

        assert!(verify(&token, KEY, epoch(1_099)).is_ok());
        assert_eq!(verify(&token, KEY, epoch(1_100)), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = sign(&SessionClaims::admin(epoch(0), 100), KEY).unwrap();
        assert_eq!(
            verify(&token, b"another key", epoch(1)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let token = sign(&SessionClaims::admin(epoch(0), 100), KEY).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = SessionClaims {
            role: ADMIN_ROLE.to_string(),
            iat: 0,
            exp: i64::MAX,
        };
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            to_base64_url(&serde_json::to_vec(&forged_claims).unwrap()),
            parts[2]
        );
        assert_eq!(verify(&forged, KEY, epoch(1)), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_wrong_role_rejected() {
        let claims = SessionClaims {
            role: "viewer".to_string(),
            iat: 0,
            exp: 100,
        };
        let token = sign(&claims, KEY).unwrap();
        assert_eq!(verify(&token, KEY, epoch(1)), Err(TokenError::WrongRole));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &SessionClaims::admin(epoch(0), 100),
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();
        assert_eq!(
            verify(&token, KEY, epoch(1)),
            Err(TokenError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_missing_expiry_rejected() {
        #[derive(Serialize)]
        struct NoExpiry {
            role: &'static str,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry { role: ADMIN_ROLE },
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();
        assert_eq!(verify(&token, KEY, epoch(1)), Err(TokenError::Malformed));
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert_eq!(verify(token, KEY, epoch(0)), Err(TokenError::Malformed));
        }
    }
}
