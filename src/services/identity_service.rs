//! Servicio de identidad
//!
//! Registro de cuentas, autenticación por rol y cambio de contraseña.
//! El signup de driver escribe dos documentos (User y Driver); si el
//! segundo falla se compensa borrando el User recién creado.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::models::driver::Driver;
use crate::models::user::{SignupRequest, User, UserRole};
use crate::repositories::{DriverRepository, UserRepository};
use crate::services::credential_service::PasswordScheme;
use crate::services::token_service::TokenIssuer;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct IdentityService {
    users: UserRepository,
    drivers: DriverRepository,
    passwords: Arc<dyn PasswordScheme>,
    tokens: Arc<dyn TokenIssuer>,
}

impl IdentityService {
    pub fn new(
        users: UserRepository,
        drivers: DriverRepository,
        passwords: Arc<dyn PasswordScheme>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            drivers,
            passwords,
            tokens,
        }
    }

    /// Registra un fleet manager
    pub async fn register_fleet_manager(&self, request: SignupRequest) -> AppResult<User> {
        self.register(request, UserRole::FleetManager).await
    }

    /// Registra un driver: cuenta User más registro Driver para el dashboard
    pub async fn register_driver(&self, request: SignupRequest) -> AppResult<(User, Driver)> {
        let user = self.register(request, UserRole::Driver).await?;

        let driver = Driver {
            id: None,
            name: user.name.clone(),
            license_number: user.license_number.clone(),
            phone: user.phone.clone(),
            email: Some(user.email.clone()),
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        };

        match self.drivers.save(driver).await {
            Ok(saved) => Ok((user, saved)),
            Err(e) => {
                // Compensación: sin registro Driver la cuenta queda huérfana
                if let Some(id) = user.id.as_deref() {
                    if let Err(cleanup) = self.users.delete_by_id(id).await {
                        warn!("No se pudo compensar el signup de driver {}: {}", id, cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    async fn register(&self, request: SignupRequest, role: UserRole) -> AppResult<User> {
        if request.email.is_empty() || request.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        if self.users.exists_by_email(&request.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            password: Some(self.passwords.protect(&request.password)?),
            phone: request.phone,
            license_number: request.license_number,
            role,
            created_at: Utc::now(),
        };

        let saved = self.users.save(user).await?;
        info!("Usuario {} registrado con rol {}", saved.email, role.as_str());
        Ok(saved)
    }

    /// Autentica y emite un token; el rol almacenado debe coincidir con el
    /// esperado. Devuelve el usuario sin credencial.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        expected_role: UserRole,
    ) -> AppResult<(User, String)> {
        let invalid = || {
            AppError::Unauthorized(format!(
                "Invalid credentials or not a {}",
                expected_role.display_name()
            ))
        };

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        let stored = user.password.as_deref().unwrap_or_default();
        if !self.passwords.verify(password, stored)? || user.role != expected_role {
            return Err(invalid());
        }

        let token = self.tokens.issue(&user)?;
        Ok((user.stripped(), token))
    }

    /// Cambia la contraseña. `Ok(false)` significa contraseña actual
    /// incorrecta (401 en el facade); usuario inexistente es error aparte.
    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<bool> {
        let mut user = self.users.find_by_email(email).await?.ok_or_else(|| {
            AppError::NotFound(format!("User not found with email: {}", email))
        })?;

        let stored = user.password.as_deref().unwrap_or_default();
        if !self.passwords.verify(current_password, stored)? {
            return Ok(false);
        }

        user.password = Some(self.passwords.protect(new_password)?);
        self.users.save(user).await?;
        Ok(true)
    }

    /// Usuarios de un rol, sin credenciales
    pub async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let users = self.users.find_by_role(role).await?;
        Ok(users.iter().map(User::stripped).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credential_service::PlaintextScheme;
    use crate::services::token_service::DummyTokenIssuer;
    use crate::store::Store;

    fn service() -> IdentityService {
        let store = Store::in_memory();
        IdentityService::new(
            UserRepository::new(store.users),
            DriverRepository::new(store.drivers),
            Arc::new(PlaintextScheme),
            Arc::new(DummyTokenIssuer),
        )
    }

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            phone: Some("555-0100".to_string()),
            license_number: Some("KA-01".to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let service = service();
        let user = service.register_fleet_manager(signup("a@x")).await.unwrap();
        assert_eq!(user.role, UserRole::FleetManager);
        assert!(user.id.is_some());

        let (logged, token) = service
            .authenticate("a@x", "secret123", UserRole::FleetManager)
            .await
            .unwrap();
        assert!(logged.password.is_none());
        assert_eq!(token, format!("dummy-token-{}", user.id.unwrap()));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service.register_fleet_manager(signup("a@x")).await.unwrap();

        let err = service
            .register_fleet_manager(signup("a@x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("Email already exists")));
    }

    #[tokio::test]
    async fn test_wrong_role_login_rejected() {
        let service = service();
        service.register_fleet_manager(signup("a@x")).await.unwrap();

        let err = service
            .authenticate("a@x", "secret123", UserRole::Driver)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_driver_signup_creates_driver_record() {
        let service = service();
        let (user, driver) = service.register_driver(signup("d@x")).await.unwrap();

        assert_eq!(user.role, UserRole::Driver);
        assert_eq!(driver.email.as_deref(), Some("d@x"));
        assert_eq!(driver.license_number.as_deref(), Some("KA-01"));
        assert!(driver.id.is_some());
    }

    #[tokio::test]
    async fn test_change_password_flow() {
        let service = service();
        service.register_fleet_manager(signup("a@x")).await.unwrap();

        // contraseña actual incorrecta
        let changed = service
            .change_password("a@x", "wrong", "longenough")
            .await
            .unwrap();
        assert!(!changed);

        let changed = service
            .change_password("a@x", "secret123", "longenough")
            .await
            .unwrap();
        assert!(changed);

        // la vieja deja de funcionar, la nueva entra
        assert!(service
            .authenticate("a@x", "secret123", UserRole::FleetManager)
            .await
            .is_err());
        assert!(service
            .authenticate("a@x", "longenough", UserRole::FleetManager)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_change_password_unknown_user() {
        let service = service();
        let err = service
            .change_password("nobody@x", "a", "longenough")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
