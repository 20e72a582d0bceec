//! Servicio de drivers
//!
//! CRUD fino sobre el registro de conductores.

use chrono::Utc;

use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::repositories::DriverRepository;
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Clone)]
pub struct DriverService {
    drivers: DriverRepository,
}

impl DriverService {
    pub fn new(drivers: DriverRepository) -> Self {
        Self { drivers }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.drivers.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        let driver = Driver {
            id: None,
            name: request.name,
            license_number: request.license_number,
            phone: request.phone,
            email: request.email,
            latitude: request.latitude,
            longitude: request.longitude,
            created_at: Utc::now(),
        };
        self.drivers.save(driver).await
    }

    /// Sobreescribe los campos editables; el id y createdAt se conservan
    pub async fn update(&self, id: &str, request: UpdateDriverRequest) -> AppResult<Driver> {
        let mut driver = self.get(id).await?;

        driver.name = request.name;
        driver.license_number = request.license_number;
        driver.phone = request.phone;
        driver.email = request.email;
        driver.latitude = request.latitude;
        driver.longitude = request.longitude;

        self.drivers.save(driver).await
    }

    /// Idempotente: tiene éxito exista o no el id
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.drivers.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::utils::errors::AppError;

    fn service() -> DriverService {
        let store = Store::in_memory();
        DriverService::new(DriverRepository::new(store.drivers))
    }

    fn create_request(name: &str) -> CreateDriverRequest {
        CreateDriverRequest {
            name: name.to_string(),
            license_number: Some("KA-01".to_string()),
            phone: None,
            email: None,
            latitude: Some(12.97),
            longitude: Some(77.59),
        }
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let service = service();
        let driver = service.create(create_request("Ravi")).await.unwrap();
        let id = driver.id.clone().unwrap();

        assert_eq!(service.list().await.unwrap().len(), 1);
        assert_eq!(service.get(&id).await.unwrap().name, "Ravi");

        let updated = service
            .update(
                &id,
                UpdateDriverRequest {
                    name: "Ravi K".to_string(),
                    license_number: None,
                    phone: Some("555-0101".to_string()),
                    email: None,
                    latitude: None,
                    longitude: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ravi K");
        assert_eq!(updated.license_number, None);
        assert_eq!(updated.created_at, driver.created_at);

        service.delete(&id).await.unwrap();
        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        // segundo delete también es exitoso
        service.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_driver() {
        let service = service();
        let err = service
            .update(
                "missing",
                UpdateDriverRequest {
                    name: "X".to_string(),
                    license_number: None,
                    phone: None,
                    email: None,
                    latitude: None,
                    longitude: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
