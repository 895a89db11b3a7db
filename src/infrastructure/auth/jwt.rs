//! JWT token issuance and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Fixed lifetime of an issued token
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Minimum signing secret length in bytes (the HS256 key size)
pub const MIN_SECRET_LENGTH: usize = 32;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User ID
    #[serde(rename = "Id")]
    pub id: String,
    /// Subject (user email)
    pub sub: String,
    pub email: String,
    /// Unique token identifier, fresh per issuance
    pub jti: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Build claims for a user issued at `now`
    pub fn new(user: &User, now: DateTime<Utc>) -> Self {
        let exp = now + Duration::seconds(TOKEN_LIFETIME_SECS);

        Self {
            id: user.id().as_str().to_string(),
            sub: user.email().to_string(),
            email: user.email().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .finish()
    }
}

/// Trait for token issuance
pub trait TokenIssuer: Send + Sync + Debug {
    /// Issue a signed token for a user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Validate a token's signature and expiry and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HMAC-SHA256 JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &Algorithm::HS256)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service, rejecting missing or short secrets
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::configuration(
                "JWT signing secret is not configured (set APP__AUTH__JWT_SECRET)",
            ));
        }

        if config.secret.len() < MIN_SECRET_LENGTH {
            return Err(DomainError::configuration(format!(
                "JWT signing secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Issue a token with an explicit issuance time
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, now);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        self.issue_at(user, Utc::now())
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    const SECRET: &str = "test-secret-key-0123456789abcdef-xyz";

    fn create_test_user() -> User {
        let id = UserId::new("user-44").unwrap();
        User::new(id, "lewis@ferrari.com", "hashed_password")
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new(SECRET)).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_service();
        let user = create_test_user();

        let token = service.issue(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.id, "user-44");
        assert_eq!(claims.sub, "lewis@ferrari.com");
        assert_eq!(claims.email, "lewis@ferrari.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expiry_is_one_hour_after_issue() {
        let service = create_service();
        let token = service.issue(&create_test_user()).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_header_is_hs256() {
        let token = create_service().issue(&create_test_user()).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_claim_names_on_the_wire() {
        let claims = JwtClaims::new(&create_test_user(), Utc::now());
        let value = serde_json::to_value(&claims).unwrap();

        for key in ["Id", "sub", "email", "jti", "iat", "exp"] {
            assert!(value.get(key).is_some(), "missing claim {}", key);
        }
    }

    #[test]
    fn test_jti_is_unique_per_token() {
        let service = create_service();
        let user = create_test_user();

        let first = service.validate(&service.issue(&user).unwrap()).unwrap();
        let second = service.validate(&service.issue(&user).unwrap()).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();
        assert!(service.validate("invalid-token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("a".repeat(32))).unwrap();
        let service2 = JwtService::new(JwtConfig::new("b".repeat(32))).unwrap();

        let token = service1.issue(&create_test_user()).unwrap();
        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_service();
        let issued = Utc::now() - Duration::hours(3);

        let token = service.issue_at(&create_test_user(), issued).unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = JwtService::new(JwtConfig::new(""));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtService::new(JwtConfig::new("too-short"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_config_debug_hides_secret() {
        let debug = format!("{:?}", JwtConfig::new(SECRET));
        assert!(!debug.contains(SECRET));
    }
}
