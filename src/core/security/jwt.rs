use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
    /// Token id, the key used when a token is revoked.
    pub jti: String,
}

impl AccessClaims {
    /// Seconds until expiry, never negative.
    pub fn remaining_secs(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// HS256 signer/verifier bound to one secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl: Duration::minutes(expire_minutes),
        }
    }

    pub fn create_access_token(
        &self,
        user_id: i32,
        expires_delta: Option<Duration>,
    ) -> anyhow::Result<(String, AccessClaims)> {
        let now = Utc::now();
        let expire = now + expires_delta.unwrap_or(self.default_ttl);
        let claims = AccessClaims {
            user_id,
            iat: now.timestamp(),
            exp: expire.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok((token, claims))
    }

    /// `None` for any token that is malformed, badly signed, expired or
    /// missing `user_id`.
    pub fn verify_access_token(&self, token: &str) -> Option<AccessClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<AccessClaims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issued_token_verifies() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let (token, claims) = issuer.create_access_token(42, None).unwrap();

        let verified = issuer.verify_access_token(&token).expect("token should verify");
        assert_eq!(verified, claims);
        assert_eq!(verified.user_id, 42);
        assert!(verified.remaining_secs() > 59 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 60);
        // Past the default 60s leeway
        let (token, _) = issuer
            .create_access_token(1, Some(Duration::minutes(-10)))
            .unwrap();

        assert!(issuer.verify_access_token(&token).is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let other = TokenIssuer::new("another-secret", 60);
        let (token, _) = other.create_access_token(1, None).unwrap();

        assert!(issuer.verify_access_token(&token).is_none());
    }

    #[test]
    fn token_without_user_id_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 60);
        let exp = (Utc::now() + Duration::minutes(5)).timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "someone", "exp": exp, "iat": 0, "jti": "x" }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(issuer.verify_access_token(&token).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 60);
        assert!(issuer.verify_access_token("not.a.jwt").is_none());
        assert!(issuer.verify_access_token("").is_none());
    }
}
