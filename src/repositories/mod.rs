//! Repositorios
//!
//! Acceso tipado a cada colección del store, con las búsquedas secundarias
//! que consumen los servicios.

pub mod driver_repository;
pub mod maintenance_repository;
pub mod route_optimization_repository;
pub mod telemetry_repository;
pub mod user_repository;

pub use driver_repository::DriverRepository;
pub use maintenance_repository::MaintenanceRepository;
pub use route_optimization_repository::RouteOptimizationRepository;
pub use telemetry_repository::TelemetryRepository;
pub use user_repository::UserRepository;
