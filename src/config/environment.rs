//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Esquema de protección de contraseñas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSchemeKind {
    /// Comparación byte a byte, como el sistema original (solo demo)
    Plaintext,
    Bcrypt,
}

/// Emisor de tokens de autenticación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenIssuerKind {
    /// Token demo `dummy-token-<id>` (contrato del frontend)
    Dummy,
    Jwt,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub password_scheme: PasswordSchemeKind,
    pub token_issuer: TokenIssuerKind,
    /// Semilla para datos mock y métricas placeholder reproducibles
    pub mock_seed: Option<u64>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL").ok(),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "neurofleetx-dev-secret-change-in-production".to_string()),
            password_scheme: match env::var("PASSWORD_SCHEME").as_deref() {
                Ok("plaintext") => PasswordSchemeKind::Plaintext,
                _ => PasswordSchemeKind::Bcrypt,
            },
            token_issuer: match env::var("TOKEN_ISSUER").as_deref() {
                Ok("jwt") => TokenIssuerKind::Jwt,
                _ => TokenIssuerKind::Dummy,
            },
            mock_seed: env::var("MOCK_SEED").ok().and_then(|s| s.parse().ok()),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EnvironmentConfig {
    /// Configuración fija para tests: store en memoria, token demo,
    /// contraseñas en claro para no pagar el costo de bcrypt en cada caso.
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            password_scheme: PasswordSchemeKind::Plaintext,
            token_issuer: TokenIssuerKind::Dummy,
            mock_seed: Some(42),
        }
    }
}
