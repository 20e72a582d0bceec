//! Emisión de tokens de autenticación
//!
//! El frontend trata el token como opaco. El emisor default produce el
//! formato demo `dummy-token-<id>` que el contrato expone; el emisor JWT
//! (HS256, firmado con `JWT_SECRET`) es un swap de configuración.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::environment::TokenIssuerKind;
use crate::models::user::User;
use crate::utils::errors::{AppError, AppResult};

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> AppResult<String>;
}

/// Token demo `dummy-token-<id>`
pub struct DummyTokenIssuer;

impl TokenIssuer for DummyTokenIssuer {
    fn issue(&self, user: &User) -> AppResult<String> {
        let id = user
            .id
            .as_deref()
            .ok_or_else(|| AppError::Internal("user without id".to_string()))?;
        Ok(format!("dummy-token-{}", id))
    }
}

/// Claims del token JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_duration: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            algorithm: Algorithm::HS256,
            token_duration: Duration::hours(24),
        }
    }

    /// Valida y decodifica un token emitido por este servicio
    pub fn validate(&self, token: &str) -> AppResult<JwtClaims> {
        let validation = Validation::new(self.algorithm);
        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> AppResult<String> {
        let id = user
            .id
            .as_deref()
            .ok_or_else(|| AppError::Internal("user without id".to_string()))?;

        let now = Utc::now();
        let claims = JwtClaims {
            sub: id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: (now + self.token_duration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }
}

/// Construye el emisor configurado
pub fn issuer_for(kind: TokenIssuerKind, jwt_secret: &str) -> Box<dyn TokenIssuer> {
    match kind {
        TokenIssuerKind::Dummy => Box::new(DummyTokenIssuer),
        TokenIssuerKind::Jwt => Box::new(JwtTokenIssuer::new(jwt_secret)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn test_user() -> User {
        User {
            id: Some("user-123".to_string()),
            name: "Test".to_string(),
            email: "test@x".to_string(),
            password: None,
            phone: None,
            license_number: None,
            role: UserRole::FleetManager,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_dummy_token_format() {
        let token = DummyTokenIssuer.issue(&test_user()).unwrap();
        assert_eq!(token, "dummy-token-user-123");
    }

    #[test]
    fn test_jwt_issue_and_validate() {
        let issuer = JwtTokenIssuer::new("test-secret");
        let token = issuer.issue(&test_user()).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.role, "fleet_manager");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_jwt_rejects_foreign_token() {
        let issuer = JwtTokenIssuer::new("test-secret");
        let other = JwtTokenIssuer::new("other-secret");
        let token = other.issue(&test_user()).unwrap();
        assert!(issuer.validate(&token).is_err());
    }
}
