//! Bearer token issue and validation (HS256, seven-day lifetime).

use crate::auth::Authenticated;
use crate::error::{AppError, AppResult, AuthError};
use crate::models::Account;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_TTL_DAYS: i64 = 7;

/// Signed claim set. Field names are the wire contract existing clients decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "_id")]
    pub account_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mints a token for an account that has just passed credential verification.
    pub fn issue(&self, who: &Authenticated) -> AppResult<String> {
        self.issue_at(who.account(), Utc::now())
    }

    fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            username: account.username.clone(),
            account_id: account.id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))
    }

    /// Checks signature and expiry; the claims are trusted as-is afterwards.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: String::new(),
            email: "a@x.com".into(),
            birthday: None,
            favorite_movies: vec![],
        }
    }

    #[test]
    fn issued_token_verifies_to_account_identity() {
        let keys = JwtKeys::new("test-jwt-secret-min-32-chars!!");
        let account = alice();
        let token = keys
            .issue(&Authenticated::new(account.clone()))
            .unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.username, account.username);
        assert_eq!(claims.account_id, account.id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("test-jwt-secret-min-32-chars!!");
        let issued = Utc::now() - Duration::days(TOKEN_TTL_DAYS + 1);
        let token = keys.issue_at(&alice(), issued).unwrap();
        assert_eq!(keys.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let ours = JwtKeys::new("test-jwt-secret-min-32-chars!!");
        let theirs = JwtKeys::new("some-other-secret-entirely-xyz");
        let token = theirs.issue_at(&alice(), Utc::now()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        let keys = JwtKeys::new("test-jwt-secret-min-32-chars!!");
        assert!(matches!(keys.verify("not.a.token"), Err(AuthError::InvalidToken(_))));
        assert!(matches!(keys.verify(""), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn claims_use_wire_field_names() {
        let keys = JwtKeys::new("test-jwt-secret-min-32-chars!!");
        let token = keys.issue_at(&alice(), Utc::now()).unwrap();
        let claims = keys.verify(&token).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        for key in ["Username", "_id", "iat", "exp"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
