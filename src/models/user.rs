//! Modelo de User
//!
//! Cuentas de la aplicación: fleet managers y drivers. El email es único
//! entre todos los usuarios; el campo `password` nunca se serializa hacia
//! el cliente (se pone a `null` antes de responder).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Rol del usuario - literal en el documento y en el wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    FleetManager,
    Driver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::FleetManager => "fleet_manager",
            UserRole::Driver => "driver",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fleet_manager" => Some(UserRole::FleetManager),
            "driver" => Some(UserRole::Driver),
            _ => None,
        }
    }

    /// Nombre legible para mensajes de error de login
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::FleetManager => "fleet manager",
            UserRole::Driver => "driver",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// Credencial protegida por el `PasswordScheme` configurado
    pub password: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Copia sin credencial, apta para cualquier response
    pub fn stripped(&self) -> User {
        let mut user = self.clone();
        user.password = None;
        user
    }
}

impl Document for User {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Request de signup (fleet manager o driver)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

/// Request de login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request de cambio de contraseña
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::from_str("fleet_manager"), Some(UserRole::FleetManager));
        assert_eq!(UserRole::from_str("driver"), Some(UserRole::Driver));
        assert_eq!(UserRole::from_str("admin"), None);
        assert_eq!(UserRole::FleetManager.as_str(), "fleet_manager");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: Some("u1".to_string()),
            name: "A".to_string(),
            email: "a@x".to_string(),
            password: None,
            phone: None,
            license_number: Some("KA-99".to_string()),
            role: UserRole::Driver,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "driver");
        assert_eq!(value["licenseNumber"], "KA-99");
        assert!(value["password"].is_null());
        assert!(value.get("createdAt").is_some());
    }
}
