/// Signed session tokens
///
/// A session is an HS256 JWT stored in the `blog_session` cookie. The token
/// only carries the user id; the user row is reloaded on every request so a
/// deleted account stops being logged in immediately.
use crate::config::SessionConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "blog_session";

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))
    }
}

/// Signing material plus cookie policy, built once at startup
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::hours(config.ttl_hours),
            secure: config.cookie_secure,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Issue a token for `user_id`
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(SESSION_ALGORITHM), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Validate signature and expiry, returning the user id
    pub fn verify(&self, token: &str) -> Result<i64> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        data.claims.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(secret: &str, ttl_hours: i64) -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: secret.to_string(),
            ttl_hours,
            cookie_secure: false,
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys("test-secret-test-secret-test-secret", 1);
        let token = keys.issue(42).expect("should issue token");
        assert_eq!(keys.verify(&token).expect("should verify"), 42);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = keys("first-secret-first-secret-first", 1)
            .issue(1)
            .expect("should issue token");
        let result = keys("second-secret-second-secret-second", 1).verify(&token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys("test-secret-test-secret-test-secret", 1);
        let claims = SessionClaims {
            sub: "1".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(&Header::new(SESSION_ALGORITHM), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let keys = keys("test-secret-test-secret-test-secret", 1);
        let mut token = keys.issue(1).expect("should issue token");
        token.push('x');
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
