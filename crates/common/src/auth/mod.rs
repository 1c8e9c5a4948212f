//! Authentication and authorization utilities
//!
//! Provides:
//! - Role model for publishing principals
//! - JWT token generation and validation
//! - Principal extraction for handlers
//! - API key hashing (tenant provisioning)
//!
//! Token verification itself happens in the auth middleware upstream of the
//! gateway; handlers consume the identity headers it injects.

use crate::errors::{AppError, Result};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Roles known to the publishing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    TenantAdmin,
    Reporter,
    AdminEditor,
    NewsModerator,
}

impl Role {
    /// Roles whose tenant scope comes from their reporter profile
    pub fn is_tenant_scoped(&self) -> bool {
        !matches!(self, Role::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "TENANT_ADMIN" => Ok(Role::TenantAdmin),
            "REPORTER" => Ok(Role::Reporter),
            "ADMIN_EDITOR" => Ok(Role::AdminEditor),
            "NEWS_MODERATOR" => Ok(Role::NewsModerator),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::TenantAdmin => "TENANT_ADMIN",
            Role::Reporter => "REPORTER",
            Role::AdminEditor => "ADMIN_EDITOR",
            Role::NewsModerator => "NEWS_MODERATOR",
        };
        f.write_str(name)
    }
}

/// Extracted principal available to handlers
#[derive(Debug, Clone)]
pub struct Principal {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Parsed role, None when the role name is not one the pipeline knows
    pub role: Option<Role>,

    /// Role name exactly as presented
    pub role_name: String,

    /// Request ID for tracing
    pub request_id: String,
}

impl Principal {
    /// Build a principal directly (used by tests and internal callers)
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role: Some(role),
            role_name: role.to_string(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Role name
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT token manager
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret
    pub fn new(secret: &str, expiration_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs: expiration_secs as i64,
        }
    }

    /// Generate a new JWT token
    pub fn generate_token(&self, user_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiration_secs);

        let claims = JwtClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AppError::Internal {
            message: format!("Failed to generate token: {}", e),
        })
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken,
            })
    }
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Validate an API key against a stored hash
pub fn validate_api_key(api_key: &str, stored_hash: &str) -> bool {
    hash_api_key(api_key) == stored_hash
}

/// Generate a new API key
pub fn generate_api_key() -> String {
    let random_bytes: [u8; 32] = rand::random();
    format!("nk_{}", hex::encode(random_bytes))
}

/// Axum extractor for Principal
///
/// Reads the identity headers injected by the auth middleware:
/// X-User-ID (required) and X-User-Role (required).
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        // Extract request ID
        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        // Extract user ID
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing or invalid X-User-ID header".to_string(),
            })?;

        // Extract role
        let role_name = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing X-User-Role header".to_string(),
            })?;

        let role = Role::from_str(&role_name).ok();

        Ok(Principal {
            user_id,
            role,
            role_name,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("SUPER_ADMIN"), Ok(Role::SuperAdmin));
        assert_eq!(Role::from_str("reporter"), Ok(Role::Reporter));
        assert_eq!(Role::from_str("NEWS_MODERATOR"), Ok(Role::NewsModerator));
        assert!(Role::from_str("INTERN").is_err());
    }

    #[test]
    fn test_tenant_scoped_roles() {
        assert!(!Role::SuperAdmin.is_tenant_scoped());
        assert!(Role::TenantAdmin.is_tenant_scoped());
        assert!(Role::Reporter.is_tenant_scoped());
        assert!(Role::AdminEditor.is_tenant_scoped());
        assert!(Role::NewsModerator.is_tenant_scoped());
    }

    #[test]
    fn test_hash_api_key() {
        let key = "nk_test_12345";
        let hash = hash_api_key(key);
        assert!(validate_api_key(key, &hash));
        assert!(!validate_api_key("wrong_key", &hash));
    }

    #[test]
    fn test_generate_api_key() {
        let key = generate_api_key();
        assert!(key.starts_with("nk_"));
        assert!(key.len() > 10);
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test_secret", 3600);

        let user_id = Uuid::new_v4();
        let token = manager.generate_token(user_id, Role::AdminEditor).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "ADMIN_EDITOR");
    }
}
