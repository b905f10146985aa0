use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::site::Site;

// Request to create a site
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSiteRequest {
    pub customer_id: i64,
    pub default_route_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub address_line_1: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address_line_2: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 10))]
    pub postcode: String,
}

// Request to update a site; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSiteRequest {
    pub customer_id: Option<i64>,
    pub default_route_id: Option<i64>,
    #[serde(default)]
    pub clear_default_route: bool,
    #[validate(length(min = 1, max = 255))]
    pub address_line_1: Option<String>,
    #[validate(length(max = 255))]
    pub address_line_2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub postcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteFilters {
    pub customer_id: Option<i64>,
}

// Site as shown to planners
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub id: i64,
    pub display_name: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub default_route_id: Option<i64>,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub postcode: String,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            display_name: site.display_name(),
            id: site.id,
            customer_id: site.customer_id,
            customer_name: site.customer_name,
            default_route_id: site.default_route_id,
            address_line_1: site.address_line_1,
            address_line_2: site.address_line_2,
            city: site.city,
            postcode: site.postcode,
        }
    }
}
