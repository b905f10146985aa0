//! Vehicle model
//!
//! A fleet vehicle. Maps to the `vehicles` table.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub registration_number: String,
    pub nickname: String,
    pub is_active: bool,
}

impl Vehicle {
    /// e.g. "Big Blue (CF21 ABC)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.nickname, self.registration_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_includes_registration() {
        let vehicle = Vehicle {
            id: 1,
            registration_number: "CF21ABC".to_string(),
            nickname: "Big Blue".to_string(),
            is_active: true,
        };
        assert_eq!(vehicle.display_name(), "Big Blue (CF21ABC)");
    }
}
