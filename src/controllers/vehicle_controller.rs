use sqlx::PgPool;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list(active).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<VehicleResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        request.validate()?;
        let registration = normalize_registration(&request.registration_number);

        if self.repository.registration_exists(&registration, None).await? {
            return Err(AppError::Conflict(format!(
                "A vehicle with registration '{}' already exists",
                registration
            )));
        }

        let vehicle = self
            .repository
            .create(&registration, request.nickname.trim(), request.is_active)
            .await?;
        Ok(vehicle.into())
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> Result<VehicleResponse, AppError> {
        request.validate()?;
        let current = self.find(id).await?;

        let registration = match request.registration_number {
            Some(raw) => {
                let registration = normalize_registration(&raw);
                if self.repository.registration_exists(&registration, Some(id)).await? {
                    return Err(AppError::Conflict(format!(
                        "A vehicle with registration '{}' already exists",
                        registration
                    )));
                }
                registration
            }
            None => current.registration_number,
        };

        let merged = Vehicle {
            id,
            registration_number: registration,
            nickname: request.nickname.map(|s| s.trim().to_string()).unwrap_or(current.nickname),
            is_active: request.is_active.unwrap_or(current.is_active),
        };
        Ok(self.repository.update(&merged).await?.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }
}

/// Registrations are stored upper case without surrounding whitespace
pub fn normalize_registration(raw: &str) -> String {
    raw.trim().to_uppercase()
}
