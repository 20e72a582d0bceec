use crate::models::telemetry::Telemetry;
use crate::store::Collection;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct TelemetryRepository {
    readings: Collection<Telemetry>,
}

impl TelemetryRepository {
    pub fn new(readings: Collection<Telemetry>) -> Self {
        Self { readings }
    }

    pub async fn save(&self, reading: Telemetry) -> AppResult<Telemetry> {
        Ok(self.readings.insert(reading).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Telemetry>> {
        Ok(self.readings.find_all().await?)
    }

    pub async fn find_by_vehicle_id(&self, vehicle_id: &str) -> AppResult<Vec<Telemetry>> {
        Ok(self
            .readings
            .find_where(|t| t.vehicle_id == vehicle_id)
            .await?)
    }
}
