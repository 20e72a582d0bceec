//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los servicios se construyen una sola vez
//! al arrancar y comparten el store y el RNG sembrable.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    DriverRepository, MaintenanceRepository, RouteOptimizationRepository, TelemetryRepository,
    UserRepository,
};
use crate::services::credential_service::scheme_for;
use crate::services::route_optimization_service::seeded_rng;
use crate::services::token_service::issuer_for;
use crate::services::{
    DriverService, IdentityService, MaintenanceService, RouteOptimizationService,
};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub identity: IdentityService,
    pub drivers: DriverService,
    pub maintenance: MaintenanceService,
    pub route_optimization: RouteOptimizationService,
    pub telemetry: TelemetryRepository,
}

impl AppState {
    pub fn new(store: Store, config: EnvironmentConfig) -> Self {
        let passwords = Arc::from(scheme_for(config.password_scheme));
        let tokens = Arc::from(issuer_for(config.token_issuer, &config.jwt_secret));
        let rng = seeded_rng(config.mock_seed);

        Self {
            identity: IdentityService::new(
                UserRepository::new(store.users),
                DriverRepository::new(store.drivers.clone()),
                passwords,
                tokens,
            ),
            drivers: DriverService::new(DriverRepository::new(store.drivers)),
            maintenance: MaintenanceService::new(
                MaintenanceRepository::new(store.maintenance),
                rng.clone(),
            ),
            route_optimization: RouteOptimizationService::new(
                RouteOptimizationRepository::new(store.route_optimizations),
                rng,
            ),
            telemetry: TelemetryRepository::new(store.telemetry),
            config,
        }
    }
}
