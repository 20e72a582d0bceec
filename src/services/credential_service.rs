//! Verificación de credenciales
//!
//! El sistema original guardaba y comparaba contraseñas en claro; aquí esa
//! política queda detrás de un trait y el default es bcrypt. El contrato de
//! los endpoints no cambia con el esquema elegido.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::config::environment::PasswordSchemeKind;
use crate::utils::errors::{AppError, AppResult};

pub trait PasswordScheme: Send + Sync {
    /// Transforma la contraseña en claro a su forma almacenada
    fn protect(&self, raw: &str) -> AppResult<String>;

    /// Verifica una contraseña en claro contra la forma almacenada
    fn verify(&self, raw: &str, stored: &str) -> AppResult<bool>;
}

/// Comparación byte a byte, el comportamiento del sistema original.
/// Solo para demos y tests.
pub struct PlaintextScheme;

impl PasswordScheme for PlaintextScheme {
    fn protect(&self, raw: &str) -> AppResult<String> {
        Ok(raw.to_string())
    }

    fn verify(&self, raw: &str, stored: &str) -> AppResult<bool> {
        Ok(raw == stored)
    }
}

/// Hash verificado con bcrypt, el default
pub struct BcryptScheme;

impl PasswordScheme for BcryptScheme {
    fn protect(&self, raw: &str) -> AppResult<String> {
        hash(raw, DEFAULT_COST).map_err(|e| AppError::Internal(format!("bcrypt hash: {}", e)))
    }

    fn verify(&self, raw: &str, stored: &str) -> AppResult<bool> {
        verify(raw, stored).map_err(|e| AppError::Internal(format!("bcrypt verify: {}", e)))
    }
}

/// Construye el esquema configurado
pub fn scheme_for(kind: PasswordSchemeKind) -> Box<dyn PasswordScheme> {
    match kind {
        PasswordSchemeKind::Plaintext => Box::new(PlaintextScheme),
        PasswordSchemeKind::Bcrypt => Box::new(BcryptScheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_round_trip() {
        let scheme = PlaintextScheme;
        let stored = scheme.protect("secret123").unwrap();
        assert_eq!(stored, "secret123");
        assert!(scheme.verify("secret123", &stored).unwrap());
        assert!(!scheme.verify("other", &stored).unwrap());
    }

    #[test]
    fn test_bcrypt_round_trip() {
        let scheme = BcryptScheme;
        let stored = scheme.protect("secret123").unwrap();
        assert_ne!(stored, "secret123");
        assert!(scheme.verify("secret123", &stored).unwrap());
        assert!(!scheme.verify("other", &stored).unwrap());
    }
}
