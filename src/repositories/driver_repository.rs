use crate::models::driver::Driver;
use crate::store::Collection;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct DriverRepository {
    drivers: Collection<Driver>,
}

impl DriverRepository {
    pub fn new(drivers: Collection<Driver>) -> Self {
        Self { drivers }
    }

    pub async fn save(&self, driver: Driver) -> AppResult<Driver> {
        Ok(self.drivers.insert(driver).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Driver>> {
        Ok(self.drivers.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Driver>> {
        Ok(self.drivers.find_all().await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        Ok(self.drivers.delete_by_id(id).await?)
    }
}
