//! Servicios de negocio

pub mod credential_service;
pub mod driver_service;
pub mod identity_service;
pub mod maintenance_service;
pub mod route_optimization_service;
pub mod token_service;

pub use driver_service::DriverService;
pub use identity_service::IdentityService;
pub use maintenance_service::MaintenanceService;
pub use route_optimization_service::RouteOptimizationService;
