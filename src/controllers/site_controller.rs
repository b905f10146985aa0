use sqlx::PgPool;
use validator::Validate;

use crate::dto::site_dto::{CreateSiteRequest, SiteResponse, UpdateSiteRequest};
use crate::models::site::Site;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::route_definition_repository::RouteDefinitionRepository;
use crate::repositories::site_repository::SiteRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct SiteController {
    sites: SiteRepository,
    customers: CustomerRepository,
    definitions: RouteDefinitionRepository,
}

impl SiteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sites: SiteRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            definitions: RouteDefinitionRepository::new(pool),
        }
    }

    pub async fn list(&self, customer_id: Option<i64>) -> Result<Vec<SiteResponse>, AppError> {
        let sites = self.sites.list(customer_id).await?;
        Ok(sites.into_iter().map(SiteResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<SiteResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateSiteRequest) -> Result<SiteResponse, AppError> {
        request.validate()?;
        self.check_references(request.customer_id, request.default_route_id).await?;

        let site = self
            .sites
            .create(
                request.customer_id,
                request.default_route_id,
                request.address_line_1.trim(),
                request.address_line_2.trim(),
                request.city.trim(),
                &normalize_postcode(&request.postcode),
            )
            .await?;
        Ok(site.into())
    }

    pub async fn update(&self, id: i64, request: UpdateSiteRequest) -> Result<SiteResponse, AppError> {
        request.validate()?;
        let current = self.find(id).await?;

        let customer_id = request.customer_id.unwrap_or(current.customer_id);
        let default_route_id = if request.clear_default_route {
            None
        } else {
            request.default_route_id.or(current.default_route_id)
        };
        self.check_references(customer_id, request.default_route_id).await?;

        let merged = Site {
            id,
            customer_id,
            customer_name: current.customer_name,
            default_route_id,
            address_line_1: request.address_line_1.map(|s| s.trim().to_string()).unwrap_or(current.address_line_1),
            address_line_2: request.address_line_2.map(|s| s.trim().to_string()).unwrap_or(current.address_line_2),
            city: request.city.map(|s| s.trim().to_string()).unwrap_or(current.city),
            postcode: request.postcode.map(|s| normalize_postcode(&s)).unwrap_or(current.postcode),
        };
        Ok(self.sites.update(&merged).await?.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.sites.delete(id).await? {
            return Err(not_found_error("Site", id));
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Site, AppError> {
        self.sites.find_by_id(id).await?.ok_or_else(|| not_found_error("Site", id))
    }

    async fn check_references(&self, customer_id: i64, default_route_id: Option<i64>) -> Result<(), AppError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(validation_error(
                "customer_id",
                "does_not_exist",
                format!("Invalid pk \"{}\" - object does not exist.", customer_id),
            ));
        }
        if let Some(route_id) = default_route_id {
            if self.definitions.find_by_id(route_id).await?.is_none() {
                return Err(validation_error(
                    "default_route_id",
                    "does_not_exist",
                    format!("Invalid pk \"{}\" - object does not exist.", route_id),
                ));
            }
        }
        Ok(())
    }
}

/// Postcodes are stored upper case with single spaces
pub fn normalize_postcode(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}
