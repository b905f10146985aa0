//! User model
//!
//! Drivers, planners and warehouse managers. Staff users may use the admin
//! API; drivers are attached to routes.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Maps to the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// First and last name, falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str) -> User {
        User {
            id: 1,
            username: "jdavies".to_string(),
            password_hash: String::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: String::new(),
            is_staff: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(user("Jon", "Davies").display_name(), "Jon Davies");
        assert_eq!(user("Jon", "").display_name(), "Jon");
        assert_eq!(user("", "").display_name(), "jdavies");
    }
}
