//! Servicio de mantenimiento
//!
//! Clasifica la salud de cada vehículo, deriva métricas y agrega
//! estadísticas de flota. El upsert usa `vehicleId` como clave natural:
//! a lo sumo un registro por vehículo.

use chrono::Utc;

use crate::models::maintenance::{
    ComponentHealth, HealthStatus, MaintenanceAlert, MaintenanceStatistics, MaintenanceUpsert,
    RiskLevel, VehicleMaintenance,
};
use crate::repositories::MaintenanceRepository;
use crate::utils::errors::AppResult;
use crate::utils::round2;

/// Umbral de mantenimiento urgente (estricto)
const URGENT_HEALTH_THRESHOLD: i32 = 50;

#[derive(Clone)]
pub struct MaintenanceService {
    records: MaintenanceRepository,
    #[cfg_attr(not(feature = "mock-data"), allow(dead_code))]
    rng: crate::services::route_optimization_service::SharedRng,
}

impl MaintenanceService {
    pub fn new(
        records: MaintenanceRepository,
        rng: crate::services::route_optimization_service::SharedRng,
    ) -> Self {
        Self { records, rng }
    }

    pub async fn get_all(&self) -> AppResult<Vec<VehicleMaintenance>> {
        self.records.find_all().await
    }

    pub async fn get_by_vehicle_id(&self, vehicle_id: &str) -> AppResult<Option<VehicleMaintenance>> {
        self.records.find_by_vehicle_id(vehicle_id).await
    }

    pub async fn get_by_health_status(
        &self,
        status: HealthStatus,
    ) -> AppResult<Vec<VehicleMaintenance>> {
        self.records.find_by_health_status(status).await
    }

    pub async fn get_by_risk_level(&self, risk: RiskLevel) -> AppResult<Vec<VehicleMaintenance>> {
        self.records.find_by_risk_level(risk).await
    }

    /// Vehículos que requieren mantenimiento urgente: healthScore < 50
    pub async fn get_urgent(&self) -> AppResult<Vec<VehicleMaintenance>> {
        self.records
            .find_by_health_score_less_than(URGENT_HEALTH_THRESHOLD)
            .await
    }

    /// Upsert con clave `vehicleId`: crea el registro o hace merge de los
    /// campos presentes sobre el existente. Las métricas derivadas se
    /// recalculan en cada escritura.
    pub async fn create_or_update(&self, input: MaintenanceUpsert) -> AppResult<VehicleMaintenance> {
        let record = match self.records.find_by_vehicle_id(&input.vehicle_id).await? {
            Some(mut existing) => {
                merge_fields(&mut existing, &input);
                existing
            }
            None => new_record(input),
        };
        self.save_recomputed(record).await
    }

    /// Actualiza por id de documento; `vehicleId` no es editable
    pub async fn update(
        &self,
        id: &str,
        input: MaintenanceUpsert,
    ) -> AppResult<Option<VehicleMaintenance>> {
        let Some(mut record) = self.records.find_by_id(id).await? else {
            return Ok(None);
        };
        merge_fields(&mut record, &input);
        Ok(Some(self.save_recomputed(record).await?))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.records.delete_by_id(id).await
    }

    async fn save_recomputed(&self, mut record: VehicleMaintenance) -> AppResult<VehicleMaintenance> {
        recompute_derived_metrics(&mut record);
        record.updated_at = Utc::now();
        self.records.save(record).await
    }

    /// Estadísticas agregadas sobre toda la flota
    pub async fn statistics(&self) -> AppResult<MaintenanceStatistics> {
        let all = self.records.find_all().await?;

        let mut stats = MaintenanceStatistics {
            total_vehicles: all.len(),
            excellent_health: 0,
            good_health: 0,
            fair_health: 0,
            poor_health: 0,
            critical_health: 0,
            low_risk: 0,
            medium_risk: 0,
            high_risk: 0,
            critical_risk: 0,
            average_health_score: 0,
            total_estimated_cost: 0.0,
            urgent_maintenance_count: 0,
        };

        let mut score_sum: i64 = 0;
        let mut cost_sum: f64 = 0.0;

        for record in &all {
            match record.health_status {
                HealthStatus::Excellent => stats.excellent_health += 1,
                HealthStatus::Good => stats.good_health += 1,
                HealthStatus::Fair => stats.fair_health += 1,
                HealthStatus::Poor => stats.poor_health += 1,
                HealthStatus::Critical => stats.critical_health += 1,
            }
            match record.risk_level {
                RiskLevel::Low => stats.low_risk += 1,
                RiskLevel::Medium => stats.medium_risk += 1,
                RiskLevel::High => stats.high_risk += 1,
                RiskLevel::Critical => stats.critical_risk += 1,
            }
            if record.health_score < URGENT_HEALTH_THRESHOLD {
                stats.urgent_maintenance_count += 1;
            }
            score_sum += record.health_score as i64;
            cost_sum += record.estimated_maintenance_cost;
        }

        if !all.is_empty() {
            stats.average_health_score =
                (score_sum as f64 / all.len() as f64).round() as i64;
        }
        stats.total_estimated_cost = round2(cost_sum);

        Ok(stats)
    }
}

/// Merge de upsert: un campo presente siempre gana, incluido un cero
/// explícito. Si llega healthScore sin clasificaciones, éstas se derivan.
fn merge_fields(target: &mut VehicleMaintenance, input: &MaintenanceUpsert) {
    if let Some(number) = &input.vehicle_number {
        target.vehicle_number = Some(number.clone());
    }
    if let Some(score) = input.health_score {
        target.health_score = score;
    }
    match input.health_status {
        Some(status) => target.health_status = status,
        None => {
            if input.health_score.is_some() {
                target.health_status = HealthStatus::from_score(target.health_score);
            }
        }
    }
    match input.risk_level {
        Some(risk) => target.risk_level = risk,
        None => {
            if input.health_score.is_some() {
                target.risk_level = RiskLevel::from_score(target.health_score);
            }
        }
    }
    if let Some(date) = input.last_maintenance_date {
        target.last_maintenance_date = Some(date);
    }
    if let Some(date) = input.next_scheduled_maintenance {
        target.next_scheduled_maintenance = Some(date);
    }
    if let Some(mileage) = input.total_mileage {
        target.total_mileage = mileage;
    }
    if let Some(mileage) = input.mileage_since_last_service {
        target.mileage_since_last_service = mileage;
    }
    if let Some(alerts) = &input.alerts {
        target.alerts = alerts
            .iter()
            .map(|a| {
                MaintenanceAlert::new(
                    a.alert_type,
                    a.component.clone(),
                    a.message.clone(),
                    a.severity,
                )
            })
            .collect();
    }
    if let Some(components) = &input.component_health {
        target.component_health = components
            .iter()
            .map(|c| ComponentHealth::from_percentage(c.component_name.clone(), c.health_percentage))
            .collect();
    }
    if let Some(cost) = input.estimated_maintenance_cost {
        target.estimated_maintenance_cost = cost;
    }
}

fn new_record(input: MaintenanceUpsert) -> VehicleMaintenance {
    let now = Utc::now();
    let health_score = input.health_score.unwrap_or(0);

    VehicleMaintenance {
        id: None,
        vehicle_id: input.vehicle_id,
        vehicle_number: input.vehicle_number,
        health_score,
        health_status: input
            .health_status
            .unwrap_or_else(|| HealthStatus::from_score(health_score)),
        last_maintenance_date: input.last_maintenance_date,
        next_scheduled_maintenance: input.next_scheduled_maintenance,
        days_since_last_maintenance: None,
        days_until_next_maintenance: None,
        total_mileage: input.total_mileage.unwrap_or(0.0),
        mileage_since_last_service: input.mileage_since_last_service.unwrap_or(0.0),
        alerts: input
            .alerts
            .unwrap_or_default()
            .into_iter()
            .map(|a| MaintenanceAlert::new(a.alert_type, a.component, a.message, a.severity))
            .collect(),
        component_health: input
            .component_health
            .unwrap_or_default()
            .into_iter()
            .map(|c| ComponentHealth::from_percentage(c.component_name, c.health_percentage))
            .collect(),
        risk_level: input
            .risk_level
            .unwrap_or_else(|| RiskLevel::from_score(health_score)),
        estimated_maintenance_cost: input.estimated_maintenance_cost.unwrap_or(0.0),
        created_at: now,
        updated_at: now,
    }
}

/// Recalcula los contadores de días; puede quedar negativo si el próximo
/// mantenimiento ya venció
fn recompute_derived_metrics(record: &mut VehicleMaintenance) {
    let now = Utc::now();
    record.days_since_last_maintenance = record
        .last_maintenance_date
        .map(|date| (now - date).num_days());
    record.days_until_next_maintenance = record
        .next_scheduled_maintenance
        .map(|date| (date - now).num_days());
}

#[cfg(feature = "mock-data")]
mod mock {
    use super::*;
    use chrono::Duration;
    use rand::Rng;

    use crate::models::maintenance::{AlertSeverity, AlertType};

    const COMPONENTS: [&str; 6] = [
        "Engine",
        "Transmission",
        "Brakes",
        "Tires",
        "Battery",
        "Suspension",
    ];

    impl MaintenanceService {
        /// Genera `count` registros sintéticos con las reglas de
        /// clasificación canónicas aplicadas de forma consistente.
        pub async fn generate_mock(&self, count: usize) -> AppResult<Vec<VehicleMaintenance>> {
            let mut generated = Vec::with_capacity(count);

            for i in 0..count {
                let record = {
                    let mut rng = self.rng.lock().expect("rng poisoned");
                    build_mock_record(&mut *rng, i)
                };

                // Se conserva el id existente para respetar la unicidad
                // por vehicleId al regenerar fixtures
                let mut record = record;
                if let Some(existing) =
                    self.records.find_by_vehicle_id(&record.vehicle_id).await?
                {
                    record.id = existing.id;
                }

                generated.push(self.records.save(record).await?);
            }

            Ok(generated)
        }
    }

    fn build_mock_record(rng: &mut impl Rng, index: usize) -> VehicleMaintenance {
        let now = Utc::now();
        let health_score: i32 = 30 + rng.gen_range(0..70);

        let last_maintenance = now - Duration::days(rng.gen_range(0..90));
        let next_scheduled = last_maintenance + Duration::days(90);

        let alert_count = rng.gen_range(0..4);
        let alerts = (0..alert_count)
            .map(|_| {
                let component = COMPONENTS[rng.gen_range(0..COMPONENTS.len())];
                let alert_type = if health_score < 40 {
                    AlertType::Critical
                } else {
                    AlertType::Warning
                };
                let severity = if health_score < 40 {
                    AlertSeverity::High
                } else if rng.gen_bool(0.5) {
                    AlertSeverity::Medium
                } else {
                    AlertSeverity::Low
                };
                MaintenanceAlert::new(
                    alert_type,
                    component.to_string(),
                    format!("{} requires attention", component),
                    severity,
                )
            })
            .collect();

        let component_health = COMPONENTS
            .iter()
            .map(|component| {
                let percentage = 40 + rng.gen_range(0..60);
                ComponentHealth::from_percentage(component.to_string(), percentage)
            })
            .collect();

        let mut record = VehicleMaintenance {
            id: None,
            vehicle_id: format!("VEH-{}", 100 + index),
            vehicle_number: Some(format!("KA-01-AB-{}", 1000 + index)),
            health_score,
            health_status: HealthStatus::from_score(health_score),
            last_maintenance_date: Some(last_maintenance),
            next_scheduled_maintenance: Some(next_scheduled),
            days_since_last_maintenance: None,
            days_until_next_maintenance: None,
            total_mileage: (50_000 + rng.gen_range(0..150_000)) as f64,
            mileage_since_last_service: (5_000 + rng.gen_range(0..15_000)) as f64,
            alerts,
            component_health,
            risk_level: RiskLevel::from_score(health_score),
            estimated_maintenance_cost: 5_000.0 + rng.gen::<f64>() * 20_000.0,
            created_at: now - Duration::days(rng.gen_range(0..180)),
            updated_at: now,
        };
        recompute_derived_metrics(&mut record);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::route_optimization_service::seeded_rng;
    use crate::store::Store;

    fn service() -> MaintenanceService {
        let store = Store::in_memory();
        MaintenanceService::new(
            MaintenanceRepository::new(store.maintenance),
            seeded_rng(Some(7)),
        )
    }

    fn upsert(vehicle_id: &str, score: i32) -> MaintenanceUpsert {
        MaintenanceUpsert {
            vehicle_id: vehicle_id.to_string(),
            vehicle_number: None,
            health_score: Some(score),
            health_status: None,
            last_maintenance_date: None,
            next_scheduled_maintenance: None,
            total_mileage: None,
            mileage_since_last_service: None,
            alerts: None,
            component_health: None,
            risk_level: None,
            estimated_maintenance_cost: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_derives_classifications() {
        let service = service();
        let record = service.create_or_update(upsert("V1", 35)).await.unwrap();

        assert_eq!(record.health_status, HealthStatus::Poor);
        assert_eq!(record.risk_level, RiskLevel::High);

        let urgent = service.get_urgent().await.unwrap();
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].vehicle_id, "V1");
    }

    #[tokio::test]
    async fn test_upsert_merges_into_existing() {
        let service = service();
        let first = service.create_or_update(upsert("V1", 35)).await.unwrap();

        let mut second = upsert("V1", 75);
        second.vehicle_number = Some("KA-05".to_string());
        let merged = service.create_or_update(second).await.unwrap();

        // mismo documento, clasificación rederivada
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.health_score, 75);
        assert_eq!(merged.health_status, HealthStatus::Good);
        assert_eq!(merged.risk_level, RiskLevel::Low);
        assert_eq!(merged.vehicle_number.as_deref(), Some("KA-05"));
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_zero_score_wins() {
        let service = service();
        service.create_or_update(upsert("V1", 80)).await.unwrap();

        let merged = service.create_or_update(upsert("V1", 0)).await.unwrap();
        assert_eq!(merged.health_score, 0);
        assert_eq!(merged.health_status, HealthStatus::Critical);
        assert_eq!(merged.risk_level, RiskLevel::Critical);
    }

    #[tokio::test]
    async fn test_days_since_last_maintenance() {
        let service = service();
        let mut input = upsert("V1", 60);
        input.last_maintenance_date = Some(Utc::now() - chrono::Duration::days(45));
        input.next_scheduled_maintenance = Some(Utc::now() + chrono::Duration::days(30));

        let record = service.create_or_update(input).await.unwrap();
        assert_eq!(record.days_since_last_maintenance, Some(45));
        // la resta cae justo por debajo de 30 días completos
        assert_eq!(record.days_until_next_maintenance, Some(29));
    }

    #[tokio::test]
    async fn test_overdue_maintenance_days_truncate_toward_zero() {
        let service = service();
        let mut input = upsert("V1", 60);
        input.next_scheduled_maintenance = Some(Utc::now() - chrono::Duration::hours(36));

        let record = service.create_or_update(input).await.unwrap();
        // vencido hace día y medio: cuenta días completos, truncando
        // hacia cero (-1, no -2)
        assert_eq!(record.days_until_next_maintenance, Some(-1));
    }

    #[tokio::test]
    async fn test_statistics() {
        let service = service();
        for (vehicle, score) in [("V1", 90), ("V2", 55), ("V3", 20)] {
            let mut input = upsert(vehicle, score);
            input.estimated_maintenance_cost = Some(150.25);
            service.create_or_update(input).await.unwrap();
        }

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total_vehicles, 3);
        assert_eq!(stats.average_health_score, 55);
        assert_eq!(stats.excellent_health, 1);
        assert_eq!(stats.fair_health, 1);
        // 20 cae en la banda "Poor" (>= 20), no en "Critical"
        assert_eq!(stats.poor_health, 1);
        assert_eq!(stats.critical_health, 0);
        assert_eq!(stats.low_risk, 1);
        assert_eq!(stats.medium_risk, 1);
        assert_eq!(stats.critical_risk, 1);
        // solo 20 está por debajo del umbral estricto de 50
        assert_eq!(stats.urgent_maintenance_count, 1);
        assert_eq!(stats.total_estimated_cost, 450.75);
    }

    #[tokio::test]
    async fn test_statistics_empty_fleet() {
        let service = service();
        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total_vehicles, 0);
        assert_eq!(stats.average_health_score, 0);
        assert_eq!(stats.total_estimated_cost, 0.0);
    }

    #[cfg(feature = "mock-data")]
    #[tokio::test]
    async fn test_mock_records_are_consistent() {
        let service = service();
        let generated = service.generate_mock(10).await.unwrap();
        assert_eq!(generated.len(), 10);

        for record in generated {
            assert!((30..100).contains(&record.health_score));
            assert_eq!(
                record.health_status,
                HealthStatus::from_score(record.health_score)
            );
            assert_eq!(record.risk_level, RiskLevel::from_score(record.health_score));
            assert_eq!(record.component_health.len(), 6);
            for component in &record.component_health {
                assert_eq!(
                    component.remaining_lifespan,
                    (component.health_percentage as f64 * 3.65).round() as i64
                );
            }
        }
    }

    #[cfg(feature = "mock-data")]
    #[tokio::test]
    async fn test_mock_regeneration_keeps_vehicle_ids_unique() {
        let service = service();
        service.generate_mock(5).await.unwrap();
        service.generate_mock(5).await.unwrap();
        assert_eq!(service.get_all().await.unwrap().len(), 5);
    }
}
