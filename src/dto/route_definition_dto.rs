use serde::Deserialize;
use validator::Validate;

// Request to create a route definition
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteDefinitionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// Request to update a route definition
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteDefinitionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteDefinitionFilters {
    pub active: Option<bool>,
}
