//! Authentication Module
//!
//! Bearer-token authentication for the Dossier API. Tokens are HS256 JWTs
//! carrying the user id as the subject claim. Authorization decisions
//! (admin capability, suspension) are NOT read from the token; they are
//! looked up fresh from the profile store on every privileged request, so
//! a role change or suspension takes effect without waiting for token
//! expiry.

use crate::error::{ApiError, ApiResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// JWT SECRET (TYPE-SAFE)
// ============================================================================

/// Type-safe JWT secret that prevents accidental logging.
#[derive(Clone)]
pub struct JwtSecret(SecretString);

impl JwtSecret {
    /// Create a new JWT secret.
    ///
    /// # Errors
    /// Returns error if the secret is empty.
    pub fn new(secret: String) -> ApiResult<Self> {
        if secret.is_empty() {
            return Err(ApiError::missing_field("jwt_secret"));
        }
        Ok(Self(SecretString::new(secret.into())))
    }

    /// Expose the secret value (only for cryptographic operations).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtSecret([REDACTED, {} chars])", self.0.expose_secret().len())
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT secret key for signing and verification
    pub jwt_secret: JwtSecret,

    /// JWT algorithm (default: HS256)
    pub jwt_algorithm: Algorithm,

    /// JWT token expiration in seconds (default: 1 hour)
    pub jwt_expiration_secs: i64,

    /// Clock skew tolerance in seconds (default: 60)
    pub jwt_leeway_secs: u64,
}

impl AuthConfig {
    /// Load authentication configuration from environment variables.
    ///
    /// - `DOSSIER_JWT_SECRET`: signing secret (required in production;
    ///   falls back to an insecure development default)
    /// - `DOSSIER_JWT_EXPIRATION_SECS`: token lifetime (default: 3600)
    pub fn from_env() -> ApiResult<Self> {
        let secret = std::env::var("DOSSIER_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("DOSSIER_JWT_SECRET not set, using insecure development default");
            "INSECURE_DEFAULT_SECRET_CHANGE_IN_PRODUCTION".to_string()
        });

        let jwt_expiration_secs = std::env::var("DOSSIER_JWT_EXPIRATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Ok(Self {
            jwt_secret: JwtSecret::new(secret)?,
            jwt_algorithm: Algorithm::HS256,
            jwt_expiration_secs,
            jwt_leeway_secs: 60,
        })
    }

    /// Construct a config with an explicit secret, for tests and embedding.
    pub fn with_secret(secret: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            jwt_secret: JwtSecret::new(secret.into())?,
            jwt_algorithm: Algorithm::HS256,
            jwt_expiration_secs: 3600,
            jwt_leeway_secs: 60,
        })
    }
}

// ============================================================================
// CLAIMS AND CONTEXT
// ============================================================================

/// JWT claims carried by Dossier access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: Uuid,
    /// Issued-at, Unix epoch seconds
    pub iat: i64,
    /// Expiry, Unix epoch seconds
    pub exp: i64,
}

/// Authenticated request context, injected into request extensions by the
/// auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

// ============================================================================
// TOKEN OPERATIONS
// ============================================================================

/// Mint a signed access token for a user.
pub fn generate_token(config: &AuthConfig, user_id: Uuid) -> ApiResult<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + config.jwt_expiration_secs,
    };

    encode(
        &Header::new(config.jwt_algorithm),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.expose().as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to sign JWT");
        ApiError::internal_error("Failed to issue token")
    })
}

/// Validate a bearer token and return the authenticated context.
pub fn validate_token(config: &AuthConfig, token: &str) -> ApiResult<AuthContext> {
    let mut validation = Validation::new(config.jwt_algorithm);
    validation.leeway = config.jwt_leeway_secs;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.expose().as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::token_expired(),
        _ => ApiError::invalid_token("Invalid authentication token"),
    })?;

    Ok(AuthContext {
        user_id: data.claims.sub,
    })
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header_value: &str) -> ApiResult<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::invalid_token("Authorization header must use Bearer scheme"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::new_entity_id;

    fn test_config() -> AuthConfig {
        AuthConfig::with_secret("test_secret").unwrap()
    }

    #[test]
    fn test_token_roundtrip() {
        let config = test_config();
        let user_id = new_entity_id();
        let token = generate_token(&config, user_id).unwrap();
        let context = validate_token(&config, &token).unwrap();
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = test_config();
        let result = validate_token(&config, "not.a.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let other = AuthConfig::with_secret("different_secret").unwrap();
        let token = generate_token(&config, new_entity_id()).unwrap();
        assert!(validate_token(&other, &token).is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtSecret::new(String::new()).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123").unwrap(), "abc123");
        assert!(extract_bearer_token("Basic abc123").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = JwtSecret::new("supersecret".to_string()).unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("REDACTED"));
    }
}
