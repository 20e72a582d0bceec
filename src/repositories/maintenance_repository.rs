use crate::models::maintenance::{HealthStatus, RiskLevel, VehicleMaintenance};
use crate::store::Collection;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct MaintenanceRepository {
    records: Collection<VehicleMaintenance>,
}

impl MaintenanceRepository {
    pub fn new(records: Collection<VehicleMaintenance>) -> Self {
        Self { records }
    }

    pub async fn save(&self, record: VehicleMaintenance) -> AppResult<VehicleMaintenance> {
        Ok(self.records.insert(record).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<VehicleMaintenance>> {
        Ok(self.records.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<VehicleMaintenance>> {
        Ok(self.records.find_all().await?)
    }

    /// A lo sumo un registro por vehicleId
    pub async fn find_by_vehicle_id(&self, vehicle_id: &str) -> AppResult<Option<VehicleMaintenance>> {
        Ok(self.records.find_one(|m| m.vehicle_id == vehicle_id).await?)
    }

    pub async fn find_by_health_status(
        &self,
        status: HealthStatus,
    ) -> AppResult<Vec<VehicleMaintenance>> {
        Ok(self.records.find_where(|m| m.health_status == status).await?)
    }

    pub async fn find_by_risk_level(&self, risk: RiskLevel) -> AppResult<Vec<VehicleMaintenance>> {
        Ok(self.records.find_where(|m| m.risk_level == risk).await?)
    }

    pub async fn find_by_health_score_less_than(
        &self,
        threshold: i32,
    ) -> AppResult<Vec<VehicleMaintenance>> {
        Ok(self
            .records
            .find_where(|m| m.health_score < threshold)
            .await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        Ok(self.records.delete_by_id(id).await?)
    }
}
