use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidationErrors;

use crate::models::collection::{Collection, FreshOilContainer};
use crate::utils::validation::{field_error, parse_bounded_string, parse_decimal, parse_non_negative_int};

pub const DOCKET_NUMBER_MAX_LENGTH: usize = 50;

/// Collection submitted by a driver for a pending stop.
///
/// Every field is optional and defaults to zero or blank. Decimal fields
/// accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionCreateRequest {
    pub waste_oil_quantity: Decimal,
    pub payment_made: Decimal,
    pub fresh_oil_container_type: Option<FreshOilContainer>,
    pub fresh_oil_container_qty: i32,
    pub fresh_oil_total_litres: Decimal,
    pub payment_received: Decimal,
    pub docket_number: String,
}

impl CollectionCreateRequest {
    /// Validate a raw JSON body, collecting every field error
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(fields) = body.as_object() else {
            errors.add(
                "non_field_errors",
                field_error("invalid", "Invalid data. Expected a dictionary.".to_string()),
            );
            return Err(errors);
        };

        let mut request = Self::default();

        if let Some(v) = present(fields, "waste_oil_quantity", &mut errors) {
            match parse_decimal(v) {
                Ok(d) => request.waste_oil_quantity = d,
                Err(e) => errors.add("waste_oil_quantity", e),
            }
        }
        if let Some(v) = present(fields, "payment_made", &mut errors) {
            match parse_decimal(v) {
                Ok(d) => request.payment_made = d,
                Err(e) => errors.add("payment_made", e),
            }
        }
        if let Some(v) = present(fields, "fresh_oil_total_litres", &mut errors) {
            match parse_decimal(v) {
                Ok(d) => request.fresh_oil_total_litres = d,
                Err(e) => errors.add("fresh_oil_total_litres", e),
            }
        }
        if let Some(v) = present(fields, "payment_received", &mut errors) {
            match parse_decimal(v) {
                Ok(d) => request.payment_received = d,
                Err(e) => errors.add("payment_received", e),
            }
        }
        if let Some(v) = present(fields, "fresh_oil_container_qty", &mut errors) {
            match parse_non_negative_int(v) {
                Ok(n) => request.fresh_oil_container_qty = n,
                Err(e) => errors.add("fresh_oil_container_qty", e),
            }
        }
        if let Some(v) = present(fields, "docket_number", &mut errors) {
            match parse_bounded_string(v, DOCKET_NUMBER_MAX_LENGTH) {
                Ok(s) => request.docket_number = s,
                Err(e) => errors.add("docket_number", e),
            }
        }

        // blank or null container type means no fresh oil delivered
        match fields.get("fresh_oil_container_type") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if s.trim().is_empty() => {}
            Some(Value::String(s)) => match s.parse::<FreshOilContainer>() {
                Ok(c) => request.fresh_oil_container_type = Some(c),
                Err(msg) => errors.add("fresh_oil_container_type", field_error("invalid_choice", msg)),
            },
            Some(_) => errors.add(
                "fresh_oil_container_type",
                field_error("invalid_choice", "Not a valid choice.".to_string()),
            ),
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

// Returns the field value unless it is absent; null is reported as an error
fn present<'a>(fields: &'a Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> Option<&'a Value> {
    match fields.get(name) {
        None => None,
        Some(Value::Null) => {
            errors.add(name, field_error("null", "This field may not be null.".to_string()));
            None
        }
        Some(v) => Some(v),
    }
}

// Collection as shown to planners
#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub id: i64,
    pub stop_id: i64,
    pub waste_oil_quantity: Decimal,
    pub payment_made: Decimal,
    pub fresh_oil_container_type: Option<FreshOilContainer>,
    pub fresh_oil_container_display: Option<&'static str>,
    pub fresh_oil_container_qty: i32,
    pub fresh_oil_total_litres: Decimal,
    pub payment_received: Decimal,
    pub docket_number: String,
    pub docket_image: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            stop_id: c.stop_id,
            waste_oil_quantity: c.waste_oil_quantity,
            payment_made: c.payment_made,
            fresh_oil_container_type: c.fresh_oil_container_type,
            fresh_oil_container_display: c.fresh_oil_container_type.map(|t| t.label()),
            fresh_oil_container_qty: c.fresh_oil_container_qty,
            fresh_oil_total_litres: c.fresh_oil_total_litres,
            payment_received: c.payment_received,
            docket_number: c.docket_number,
            docket_image: c.docket_image,
            timestamp: c.timestamp,
        }
    }
}

// Reply to a successful submission
#[derive(Debug, Serialize)]
pub struct CollectionSubmittedResponse {
    pub message: String,
    pub collection_id: i64,
    pub stop_id: i64,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct CollectionFilters {
    pub route_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn original_driver_fields_are_accepted() {
        let request = CollectionCreateRequest::from_json(&json!({
            "waste_oil_quantity": "45.50",
            "payment_made": 12,
            "docket_number": "D-1001"
        }))
        .unwrap();
        assert_eq!(request.waste_oil_quantity, Decimal::from_str("45.50").unwrap());
        assert_eq!(request.payment_made, Decimal::from(12));
        assert_eq!(request.docket_number, "D-1001");
        assert_eq!(request.fresh_oil_container_type, None);
        assert_eq!(request.fresh_oil_container_qty, 0);
    }

    #[test]
    fn empty_body_uses_defaults() {
        let request = CollectionCreateRequest::from_json(&json!({})).unwrap();
        assert_eq!(request, CollectionCreateRequest::default());
    }

    #[test]
    fn fresh_oil_fields_are_parsed() {
        let request = CollectionCreateRequest::from_json(&json!({
            "fresh_oil_container_type": "BARREL",
            "fresh_oil_container_qty": 2,
            "fresh_oil_total_litres": "400",
            "payment_received": "310.00"
        }))
        .unwrap();
        assert_eq!(request.fresh_oil_container_type, Some(FreshOilContainer::Barrel));
        assert_eq!(request.fresh_oil_container_qty, 2);
        assert_eq!(request.fresh_oil_total_litres, Decimal::from(400));
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let errors = CollectionCreateRequest::from_json(&json!({
            "waste_oil_quantity": "lots",
            "payment_made": "1.999",
            "fresh_oil_container_qty": -1,
            "fresh_oil_container_type": "TUB",
            "docket_number": "x".repeat(51)
        }))
        .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("waste_oil_quantity"));
        assert!(fields.contains_key("payment_made"));
        assert!(fields.contains_key("fresh_oil_container_qty"));
        assert!(fields.contains_key("fresh_oil_container_type"));
        assert!(fields.contains_key("docket_number"));
    }

    #[test]
    fn null_quantities_are_rejected() {
        let errors = CollectionCreateRequest::from_json(&json!({ "waste_oil_quantity": null })).unwrap_err();
        assert_eq!(errors.field_errors()["waste_oil_quantity"][0].code, "null");
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let errors = CollectionCreateRequest::from_json(&json!([1, 2])).unwrap_err();
        assert!(errors.field_errors().contains_key("non_field_errors"));
    }
}
