//! Servicio de registros de optimización de rutas
//!
//! Almacena rutas ya optimizadas por el caller y completa métricas
//! placeholder (lo que un optimizador real habría producido). La
//! aleatoriedad sale de un RNG sembrable para que los tests sean
//! reproducibles.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::route_optimization::{
    Location, LocationInput, OptimizationStatistics, RouteOptimization, RouteOptimizationRequest,
    RouteStatus,
};
use crate::repositories::RouteOptimizationRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::round2;

/// Kilómetros sintéticos por parada del camino
const DISTANCE_PER_STOP_KM: f64 = 15.0;
/// Minutos sintéticos por kilómetro
const DURATION_PER_KM_MIN: f64 = 2.5;

pub type SharedRng = Arc<Mutex<StdRng>>;

/// RNG compartido; con semilla fija las métricas placeholder y los datos
/// mock son reproducibles
pub fn seeded_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

#[derive(Clone)]
pub struct RouteOptimizationService {
    routes: RouteOptimizationRepository,
    rng: SharedRng,
}

impl RouteOptimizationService {
    pub fn new(routes: RouteOptimizationRepository, rng: SharedRng) -> Self {
        Self { routes, rng }
    }

    pub async fn get_all(&self) -> AppResult<Vec<RouteOptimization>> {
        self.routes.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<RouteOptimization>> {
        self.routes.find_by_id(id).await
    }

    pub async fn get_by_route_id(&self, route_id: &str) -> AppResult<Vec<RouteOptimization>> {
        self.routes.find_by_route_id(route_id).await
    }

    pub async fn get_by_vehicle_id(&self, vehicle_id: &str) -> AppResult<Vec<RouteOptimization>> {
        self.routes.find_by_vehicle_id(vehicle_id).await
    }

    pub async fn get_by_driver_id(&self, driver_id: &str) -> AppResult<Vec<RouteOptimization>> {
        self.routes.find_by_driver_id(driver_id).await
    }

    pub async fn get_by_status(&self, status: RouteStatus) -> AppResult<Vec<RouteOptimization>> {
        self.routes.find_by_status(status).await
    }

    /// Crea un registro: `calculatedAt` pasa a ahora, el estado arranca en
    /// `active` y, si hay camino, se sintetizan las métricas.
    pub async fn create(&self, request: RouteOptimizationRequest) -> AppResult<RouteOptimization> {
        validate_load(&request)?;

        let mut route = RouteOptimization {
            id: None,
            route_id: request.route_id,
            vehicle_id: request.vehicle_id,
            driver_id: request.driver_id,
            optimized_path: normalize_path(request.optimized_path),
            estimated_distance: 0.0,
            estimated_duration: 0.0,
            fuel_efficiency: 0.0,
            load_capacity: request.load_capacity,
            current_load: request.current_load,
            cost_savings: 0.0,
            optimization_algorithm: request.optimization_algorithm,
            calculated_at: Utc::now(),
            status: RouteStatus::Active,
        };

        self.compute_metrics(&mut route);
        self.routes.save(route).await
    }

    /// Sobreescribe los campos del registro y recalcula métricas
    pub async fn update(
        &self,
        id: &str,
        request: RouteOptimizationRequest,
    ) -> AppResult<Option<RouteOptimization>> {
        validate_load(&request)?;

        let Some(mut route) = self.routes.find_by_id(id).await? else {
            return Ok(None);
        };

        route.route_id = request.route_id;
        route.vehicle_id = request.vehicle_id;
        route.driver_id = request.driver_id;
        route.optimized_path = normalize_path(request.optimized_path);
        if let Some(status) = request.status {
            route.status = status;
        }
        route.load_capacity = request.load_capacity;
        route.current_load = request.current_load;

        self.compute_metrics(&mut route);
        Ok(Some(self.routes.save(route).await?))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.routes.delete_by_id(id).await
    }

    /// Métricas placeholder en función del largo del camino; un camino
    /// vacío no toca las métricas existentes
    fn compute_metrics(&self, route: &mut RouteOptimization) {
        if route.optimized_path.is_empty() {
            return;
        }

        let distance = route.optimized_path.len() as f64 * DISTANCE_PER_STOP_KM;
        route.estimated_distance = distance;
        route.estimated_duration = distance * DURATION_PER_KM_MIN;

        let mut rng = self.rng.lock().expect("rng poisoned");
        route.fuel_efficiency = 12.0 + rng.gen::<f64>() * 8.0;
        route.cost_savings = distance * 2.5 * (1.0 + rng.gen::<f64>() * 0.3);
    }

    /// Estadísticas agregadas de optimización
    pub async fn statistics(&self) -> AppResult<OptimizationStatistics> {
        let all = self.routes.find_all().await?;

        let active = all
            .iter()
            .filter(|r| r.status == RouteStatus::Active)
            .count();
        let completed = all
            .iter()
            .filter(|r| r.status == RouteStatus::Completed)
            .count();

        let average_fuel_efficiency = if all.is_empty() {
            0.0
        } else {
            round2(all.iter().map(|r| r.fuel_efficiency).sum::<f64>() / all.len() as f64)
        };

        let total_cost_savings = round2(all.iter().map(|r| r.cost_savings).sum());

        let utilizations: Vec<f64> = all
            .iter()
            .filter(|r| r.load_capacity > 0.0)
            .map(|r| r.current_load / r.load_capacity * 100.0)
            .collect();
        let average_load_utilization = if utilizations.is_empty() {
            0.0
        } else {
            round2(utilizations.iter().sum::<f64>() / utilizations.len() as f64)
        };

        Ok(OptimizationStatistics {
            total_routes: all.len(),
            active_routes: active,
            completed_routes: completed,
            average_fuel_efficiency,
            total_cost_savings,
            average_load_utilization,
        })
    }
}

/// currentLoad no puede superar loadCapacity cuando ambos son positivos
fn validate_load(request: &RouteOptimizationRequest) -> AppResult<()> {
    if request.load_capacity > 0.0
        && request.current_load > 0.0
        && request.current_load > request.load_capacity
    {
        return Err(AppError::BadRequest(
            "currentLoad cannot exceed loadCapacity".to_string(),
        ));
    }
    Ok(())
}

/// Los sequenceNumber del camino se normalizan a 1-based contiguos
fn normalize_path(path: Vec<LocationInput>) -> Vec<Location> {
    path.into_iter()
        .enumerate()
        .map(|(index, stop)| Location {
            latitude: stop.latitude,
            longitude: stop.longitude,
            address: stop.address,
            sequence_number: index as i32 + 1,
        })
        .collect()
}

#[cfg(feature = "mock-data")]
mod mock {
    use super::*;
    use chrono::Duration;

    const ALGORITHMS: [&str; 4] = ["Dijkstra", "A* Algorithm", "Genetic Algorithm", "Ant Colony"];
    const STATUSES: [RouteStatus; 3] = [
        RouteStatus::Active,
        RouteStatus::Pending,
        RouteStatus::Completed,
    ];

    impl RouteOptimizationService {
        /// Genera `count` rutas sintéticas (zona de Bangalore, como los
        /// fixtures originales)
        pub async fn generate_mock(&self, count: usize) -> AppResult<Vec<RouteOptimization>> {
            let mut generated = Vec::with_capacity(count);

            for i in 0..count {
                let route = {
                    let mut rng = self.rng.lock().expect("rng poisoned");
                    build_mock_route(&mut *rng, i)
                };
                generated.push(self.routes.save(route).await?);
            }

            Ok(generated)
        }
    }

    fn build_mock_route(rng: &mut impl Rng, index: usize) -> RouteOptimization {
        let path = (0..5)
            .map(|j| Location {
                latitude: 12.9 + rng.gen::<f64>() * 0.2,
                longitude: 77.5 + rng.gen::<f64>() * 0.2,
                address: format!("Location {}", j + 1),
                sequence_number: j + 1,
            })
            .collect();

        RouteOptimization {
            id: None,
            route_id: format!("ROUTE-{}", 1000 + index),
            vehicle_id: Some(format!("VEH-{}", 100 + rng.gen_range(0..50))),
            driver_id: Some(format!("DRV-{}", 200 + rng.gen_range(0..30))),
            optimized_path: path,
            estimated_distance: 20.0 + rng.gen::<f64>() * 80.0,
            estimated_duration: 30.0 + rng.gen::<f64>() * 120.0,
            fuel_efficiency: 15.0 + rng.gen::<f64>() * 10.0,
            load_capacity: (1000 + rng.gen_range(0..4000)) as f64,
            current_load: (500 + rng.gen_range(0..3000)) as f64,
            cost_savings: 100.0 + rng.gen::<f64>() * 500.0,
            optimization_algorithm: Some(ALGORITHMS[rng.gen_range(0..ALGORITHMS.len())].to_string()),
            calculated_at: Utc::now() - Duration::hours(rng.gen_range(0..48)),
            status: STATUSES[rng.gen_range(0..STATUSES.len())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn service() -> RouteOptimizationService {
        let store = Store::in_memory();
        RouteOptimizationService::new(
            RouteOptimizationRepository::new(store.route_optimizations),
            seeded_rng(Some(42)),
        )
    }

    fn request(route_id: &str, stops: usize) -> RouteOptimizationRequest {
        RouteOptimizationRequest {
            route_id: route_id.to_string(),
            vehicle_id: Some("VEH-1".to_string()),
            driver_id: Some("DRV-1".to_string()),
            optimized_path: (0..stops)
                .map(|i| LocationInput {
                    latitude: 12.9,
                    longitude: 77.5,
                    address: format!("Stop {}", i + 1),
                    sequence_number: None,
                })
                .collect(),
            load_capacity: 2000.0,
            current_load: 1500.0,
            optimization_algorithm: Some("Dijkstra".to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_fills_metrics() {
        let service = service();
        let route = service.create(request("R1", 4)).await.unwrap();

        assert_eq!(route.status, RouteStatus::Active);
        assert_eq!(route.estimated_distance, 60.0); // 4 * 15
        assert_eq!(route.estimated_duration, 150.0); // 60 * 2.5
        assert!((12.0..20.0).contains(&route.fuel_efficiency));
        // savings = 60 * 2.5 * (1 + r), r en [0, 0.3)
        assert!((150.0..195.0).contains(&route.cost_savings));
    }

    #[tokio::test]
    async fn test_path_sequence_normalized() {
        let service = service();
        let mut req = request("R1", 3);
        // secuencias del caller desordenadas y con huecos
        req.optimized_path[0].sequence_number = Some(7);
        req.optimized_path[2].sequence_number = Some(2);

        let route = service.create(req).await.unwrap();
        let sequence: Vec<i32> = route
            .optimized_path
            .iter()
            .map(|l| l.sequence_number)
            .collect();
        assert_eq!(sequence, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_path_leaves_metrics_at_zero() {
        let service = service();
        let route = service.create(request("R1", 0)).await.unwrap();
        assert_eq!(route.estimated_distance, 0.0);
        assert_eq!(route.fuel_efficiency, 0.0);
    }

    #[tokio::test]
    async fn test_overload_rejected() {
        let service = service();
        let mut req = request("R1", 2);
        req.current_load = 3000.0;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_recomputes_metrics() {
        let service = service();
        let route = service.create(request("R1", 2)).await.unwrap();
        let id = route.id.clone().unwrap();

        let mut req = request("R1-B", 6);
        req.status = Some(RouteStatus::Completed);
        let updated = service.update(&id, req).await.unwrap().unwrap();

        assert_eq!(updated.route_id, "R1-B");
        assert_eq!(updated.status, RouteStatus::Completed);
        assert_eq!(updated.estimated_distance, 90.0);
        assert_eq!(updated.estimated_duration, 225.0);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let service = service();
        assert!(service
            .update("missing", request("R1", 2))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_statistics() {
        let service = service();
        let first = service.create(request("R1", 2)).await.unwrap();
        service.create(request("R2", 4)).await.unwrap();

        // completar la primera
        let mut req = request("R1", 2);
        req.status = Some(RouteStatus::Completed);
        service
            .update(first.id.as_deref().unwrap(), req)
            .await
            .unwrap();

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total_routes, 2);
        assert_eq!(stats.active_routes, 1);
        assert_eq!(stats.completed_routes, 1);
        assert!(stats.average_fuel_efficiency >= 12.0);
        assert!(stats.total_cost_savings > 0.0);
        // ambas rutas al 75% de capacidad
        assert_eq!(stats.average_load_utilization, 75.0);
    }

    #[tokio::test]
    async fn test_metrics_reproducible_with_same_seed() {
        let store_a = Store::in_memory();
        let a = RouteOptimizationService::new(
            RouteOptimizationRepository::new(store_a.route_optimizations),
            seeded_rng(Some(9)),
        );
        let store_b = Store::in_memory();
        let b = RouteOptimizationService::new(
            RouteOptimizationRepository::new(store_b.route_optimizations),
            seeded_rng(Some(9)),
        );

        let ra = a.create(request("R1", 3)).await.unwrap();
        let rb = b.create(request("R1", 3)).await.unwrap();
        assert_eq!(ra.fuel_efficiency, rb.fuel_efficiency);
        assert_eq!(ra.cost_savings, rb.cost_savings);
    }

    #[cfg(feature = "mock-data")]
    #[tokio::test]
    async fn test_mock_routes() {
        let service = service();
        let generated = service.generate_mock(8).await.unwrap();
        assert_eq!(generated.len(), 8);

        for route in generated {
            assert_eq!(route.optimized_path.len(), 5);
            let sequence: Vec<i32> = route
                .optimized_path
                .iter()
                .map(|l| l.sequence_number)
                .collect();
            assert_eq!(sequence, vec![1, 2, 3, 4, 5]);
            assert!(route.route_id.starts_with("ROUTE-"));
        }
    }
}
