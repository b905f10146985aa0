use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request to create a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10))]
    pub registration_number: String,
    #[validate(length(min = 1, max = 50))]
    pub nickname: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// Request to update a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 10))]
    pub registration_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub nickname: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub active: Option<bool>,
}

// Vehicle response
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub display_name: String,
    pub registration_number: String,
    pub nickname: String,
    pub is_active: bool,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            display_name: vehicle.display_name(),
            id: vehicle.id,
            registration_number: vehicle.registration_number,
            nickname: vehicle.nickname,
            is_active: vehicle.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_vehicles_are_active_by_default() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "registration_number": "CF21ABC",
            "nickname": "Big Blue"
        }))
        .unwrap();
        assert!(request.is_active);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn registration_is_at_most_ten_characters() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "registration_number": "CF21 ABC XYZ",
            "nickname": "Big Blue"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
