use std::collections::HashSet;

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::route_dto::{
    CreateRouteRequest, DriverResponse, RouteDetailResponse, RouteFilters, RouteResponse, UpdateRouteRequest,
};
use crate::dto::stop_dto::{AdminStopResponse, NewStopRequest, ReorderStopsRequest};
use crate::dto::vehicle_log_dto::{CreateVehicleLogRequest, UpdateVehicleLogRequest, VehicleLogResponse};
use crate::models::route::Route;
use crate::models::route_definition::RouteDefinition;
use crate::repositories::route_definition_repository::RouteDefinitionRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::site_repository::SiteRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_log_repository::VehicleLogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

/// Planning of daily routes, their stops and the end-of-day vehicle log
pub struct RouteController {
    routes: RouteRepository,
    stops: StopRepository,
    definitions: RouteDefinitionRepository,
    vehicles: VehicleRepository,
    sites: SiteRepository,
    users: UserRepository,
    logs: VehicleLogRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            stops: StopRepository::new(pool.clone()),
            definitions: RouteDefinitionRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            sites: SiteRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            logs: VehicleLogRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &RouteFilters) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self.routes.list(filters).await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    /// Route with drivers, stops in driving order and the daily log if recorded
    pub async fn get(&self, id: i64) -> Result<RouteDetailResponse, AppError> {
        let summary = self
            .routes
            .find_summary(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))?;

        let drivers = self.routes.drivers(id).await?;
        let stops = self.stops.list_for_route(id).await?;
        let log = self.logs.find_by_route(id).await?;

        Ok(RouteDetailResponse {
            route: summary.into(),
            drivers: drivers.into_iter().map(DriverResponse::from).collect(),
            stops: stops.into_iter().map(AdminStopResponse::from).collect(),
            log: log.map(VehicleLogResponse::from),
        })
    }

    pub async fn create(&self, request: CreateRouteRequest) -> Result<RouteDetailResponse, AppError> {
        let definition = self
            .definitions
            .find_by_id(request.definition_id)
            .await?
            .ok_or_else(|| invalid_pk("definition_id", request.definition_id))?;
        check_definition_active(&definition)?;
        self.check_vehicle(request.vehicle_id).await?;
        self.check_drivers(&request.driver_ids).await?;
        for stop in &request.stops {
            stop.validate()?;
            self.check_site(stop.site_id).await?;
        }

        let route = self
            .routes
            .create(
                request.definition_id,
                request.vehicle_id,
                request.route_date,
                &request.driver_ids,
                &request.stops,
            )
            .await?;

        info!(
            "Route {} planned for vehicle {} on {} with {} stops",
            route.id,
            route.vehicle_id,
            route.route_date,
            request.stops.len()
        );
        self.get(route.id).await
    }

    pub async fn update(&self, id: i64, request: UpdateRouteRequest) -> Result<RouteDetailResponse, AppError> {
        let current = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))?;

        if let Some(definition_id) = request.definition_id {
            self.check_definition(definition_id).await?;
        }
        if let Some(vehicle_id) = request.vehicle_id {
            self.check_vehicle(vehicle_id).await?;
        }
        if let Some(driver_ids) = &request.driver_ids {
            self.check_drivers(driver_ids).await?;
        }

        let merged = Route {
            id,
            definition_id: request.definition_id.unwrap_or(current.definition_id),
            vehicle_id: request.vehicle_id.unwrap_or(current.vehicle_id),
            route_date: request.route_date.unwrap_or(current.route_date),
        };
        self.routes.update(&merged, request.driver_ids.as_deref()).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.logs.find_by_route(id).await?.is_some() {
            return Err(AppError::Conflict(
                "A daily vehicle log has been recorded for this route; it cannot be deleted".to_string(),
            ));
        }
        if !self.routes.delete(id).await? {
            return Err(not_found_error("Route", id));
        }
        info!("Route {} deleted", id);
        Ok(())
    }

    /// Append a stop; without an explicit sequence it goes after the current last stop
    pub async fn add_stop(&self, route_id: i64, request: NewStopRequest) -> Result<AdminStopResponse, AppError> {
        request.validate()?;
        self.find_route(route_id).await?;
        self.check_site(request.site_id).await?;

        let sequence = match request.sequence {
            Some(sequence) => sequence,
            None => self.stops.next_sequence(route_id).await?,
        };
        let stop = self
            .stops
            .create(route_id, request.site_id, sequence, request.is_priority)
            .await?;

        self.stops
            .find_detail(stop.id)
            .await?
            .map(AdminStopResponse::from)
            .ok_or_else(|| not_found_error("Stop", stop.id))
    }

    /// Renumber the route's stops 1..n in the given order
    pub async fn reorder_stops(&self, route_id: i64, request: ReorderStopsRequest) -> Result<Vec<AdminStopResponse>, AppError> {
        self.find_route(route_id).await?;
        let current = self.stops.ids_for_route(route_id).await?;
        check_reorder(&current, &request.stop_ids)?;

        self.stops.reorder(route_id, &request.stop_ids).await?;
        let stops = self.stops.list_for_route(route_id).await?;
        Ok(stops.into_iter().map(AdminStopResponse::from).collect())
    }

    pub async fn get_log(&self, route_id: i64) -> Result<VehicleLogResponse, AppError> {
        self.find_route(route_id).await?;
        self.logs
            .find_by_route(route_id)
            .await?
            .map(VehicleLogResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("No daily vehicle log recorded for route {}", route_id)))
    }

    /// One log per route; `checked_by_id` is the staff member recording it
    pub async fn create_log(
        &self,
        route_id: i64,
        checked_by_id: i64,
        request: CreateVehicleLogRequest,
    ) -> Result<VehicleLogResponse, AppError> {
        request.validate()?;
        self.find_route(route_id).await?;

        if self.logs.find_by_route(route_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A daily vehicle log already exists for route {}",
                route_id
            )));
        }

        let log = self.logs.create(route_id, checked_by_id, &request).await?;
        info!("Daily vehicle log {} recorded for route {} by user {}", log.id, route_id, checked_by_id);
        Ok(log.into())
    }

    pub async fn update_log(
        &self,
        route_id: i64,
        checked_by_id: i64,
        request: UpdateVehicleLogRequest,
    ) -> Result<VehicleLogResponse, AppError> {
        request.validate()?;
        let mut log = self
            .logs
            .find_by_route(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No daily vehicle log recorded for route {}", route_id)))?;

        if let Some(value) = request.start_day_waste_oil {
            log.start_day_waste_oil = value;
        }
        if let Some(value) = request.end_day_waste_oil {
            log.end_day_waste_oil = value;
        }
        if let Some(value) = request.start_day_fresh_oil {
            log.start_day_fresh_oil = value;
        }
        if let Some(value) = request.end_day_fresh_oil {
            log.end_day_fresh_oil = value;
        }
        log.checked_by_id = checked_by_id;

        Ok(self.logs.update(&log).await?.into())
    }

    async fn find_route(&self, id: i64) -> Result<Route, AppError> {
        self.routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))
    }

    async fn check_definition(&self, id: i64) -> Result<(), AppError> {
        if self.definitions.find_by_id(id).await?.is_none() {
            return Err(invalid_pk("definition_id", id));
        }
        Ok(())
    }

    async fn check_vehicle(&self, id: i64) -> Result<(), AppError> {
        if self.vehicles.find_by_id(id).await?.is_none() {
            return Err(invalid_pk("vehicle_id", id));
        }
        Ok(())
    }

    async fn check_site(&self, id: i64) -> Result<(), AppError> {
        if !self.sites.exists(id).await? {
            return Err(invalid_pk("site_id", id));
        }
        Ok(())
    }

    async fn check_drivers(&self, driver_ids: &[i64]) -> Result<(), AppError> {
        let unique: HashSet<i64> = driver_ids.iter().copied().collect();
        if unique.len() != driver_ids.len() {
            return Err(validation_error(
                "driver_ids",
                "duplicate",
                "Each driver can only be assigned once.".to_string(),
            ));
        }
        if driver_ids.is_empty() {
            return Ok(());
        }
        let active = self.users.count_active(driver_ids).await?;
        if active != driver_ids.len() as i64 {
            return Err(validation_error(
                "driver_ids",
                "does_not_exist",
                "Every driver must be an existing active user.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Retired definitions cannot take new routes
pub fn check_definition_active(definition: &RouteDefinition) -> Result<(), AppError> {
    if !definition.is_active {
        return Err(validation_error(
            "definition_id",
            "inactive",
            format!("Route definition '{}' is inactive.", definition.name),
        ));
    }
    Ok(())
}

fn invalid_pk(field: &'static str, id: i64) -> AppError {
    validation_error(
        field,
        "does_not_exist",
        format!("Invalid pk \"{}\" - object does not exist.", id),
    )
}

/// A reorder must list every stop of the route exactly once
pub fn check_reorder(current: &[i64], requested: &[i64]) -> Result<(), AppError> {
    let current: HashSet<i64> = current.iter().copied().collect();
    let requested_set: HashSet<i64> = requested.iter().copied().collect();

    if requested_set.len() != requested.len() || requested_set != current {
        return Err(validation_error(
            "stop_ids",
            "invalid",
            "stop_ids must list every stop of the route exactly once.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_accepts_a_permutation() {
        assert!(check_reorder(&[4, 5, 6], &[6, 4, 5]).is_ok());
        assert!(check_reorder(&[], &[]).is_ok());
    }

    #[test]
    fn reorder_rejects_missing_foreign_or_repeated_ids() {
        assert!(check_reorder(&[4, 5, 6], &[4, 5]).is_err());
        assert!(check_reorder(&[4, 5, 6], &[4, 5, 7]).is_err());
        assert!(check_reorder(&[4, 5], &[4, 4, 5]).is_err());
    }

    #[test]
    fn inactive_definitions_take_no_new_routes() {
        let mut definition = RouteDefinition {
            id: 4,
            name: "Old Valleys".to_string(),
            is_active: true,
        };
        assert!(check_definition_active(&definition).is_ok());

        definition.is_active = false;
        match check_definition_active(&definition) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.field_errors()["definition_id"][0].code, "inactive")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reorder_error_names_the_field() {
        match check_reorder(&[1], &[2]) {
            Err(AppError::Validation(errors)) => assert!(errors.field_errors().contains_key("stop_ids")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
