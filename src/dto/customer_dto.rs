use serde::Deserialize;
use validator::Validate;

// Request to create a customer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub contact_person: String,
    #[validate(email, length(max = 254))]
    pub contact_email: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub contact_phone: String,
}

// Request to update a customer; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(email, length(max = 254))]
    pub contact_email: Option<String>,
    #[validate(length(max = 20))]
    pub contact_phone: Option<String>,
}
