use crate::models::route_optimization::{RouteOptimization, RouteStatus};
use crate::store::Collection;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct RouteOptimizationRepository {
    routes: Collection<RouteOptimization>,
}

impl RouteOptimizationRepository {
    pub fn new(routes: Collection<RouteOptimization>) -> Self {
        Self { routes }
    }

    pub async fn save(&self, route: RouteOptimization) -> AppResult<RouteOptimization> {
        Ok(self.routes.insert(route).await?)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<RouteOptimization>> {
        Ok(self.routes.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<RouteOptimization>> {
        Ok(self.routes.find_all().await?)
    }

    pub async fn find_by_route_id(&self, route_id: &str) -> AppResult<Vec<RouteOptimization>> {
        Ok(self.routes.find_where(|r| r.route_id == route_id).await?)
    }

    pub async fn find_by_vehicle_id(&self, vehicle_id: &str) -> AppResult<Vec<RouteOptimization>> {
        Ok(self
            .routes
            .find_where(|r| r.vehicle_id.as_deref() == Some(vehicle_id))
            .await?)
    }

    pub async fn find_by_driver_id(&self, driver_id: &str) -> AppResult<Vec<RouteOptimization>> {
        Ok(self
            .routes
            .find_where(|r| r.driver_id.as_deref() == Some(driver_id))
            .await?)
    }

    pub async fn find_by_status(&self, status: RouteStatus) -> AppResult<Vec<RouteOptimization>> {
        Ok(self.routes.find_where(|r| r.status == status).await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        Ok(self.routes.delete_by_id(id).await?)
    }
}
