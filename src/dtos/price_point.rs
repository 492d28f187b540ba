// src/dtos/price_point.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dtos::{non_null, validate_price, validate_text};
use crate::error::AppError;
use crate::models::price_point::{PriceCondition, PricePoint};
use crate::money::cents_to_dollars;

const PLATFORM_MAX_CHARS: usize = 60;
pub const DEFAULT_PLATFORM: &str = "unknown";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricePointRequest {
    pub price: f64,
    #[serde(default, deserialize_with = "non_null")]
    pub condition: Option<PriceCondition>,
    #[serde(default, deserialize_with = "non_null")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CreatePricePointRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_price("price", self.price)?;
        if let Some(platform) = &self.platform {
            validate_text("platform", platform, PLATFORM_MAX_CHARS)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePointResponse {
    pub id: i64,
    pub price: f64,
    pub condition: PriceCondition,
    pub platform: String,
    pub recorded_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPricePointResponse {
    pub id: i64,
    pub product_id: i64,
    pub price: f64,
    pub condition: PriceCondition,
    pub platform: String,
    pub recorded_at: String,
}

impl From<PricePoint> for PricePointResponse {
    fn from(point: PricePoint) -> Self {
        Self {
            id: point.id,
            price: cents_to_dollars(point.price_cents),
            condition: point.condition,
            platform: point.platform,
            recorded_at: point.recorded_at.to_rfc3339(),
        }
    }
}

impl From<PricePoint> for CreatedPricePointResponse {
    fn from(point: PricePoint) -> Self {
        Self {
            id: point.id,
            product_id: point.product_id,
            price: cents_to_dollars(point.price_cents),
            condition: point.condition,
            platform: point.platform,
            recorded_at: point.recorded_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_may_be_omitted() {
        let req: CreatePricePointRequest = serde_json::from_value(json!({ "price": 45.5 })).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.condition.is_none());
        assert!(req.recorded_at.is_none());
    }

    #[test]
    fn parses_condition_and_timestamp() {
        let req: CreatePricePointRequest = serde_json::from_value(json!({
            "price": 10,
            "condition": "used",
            "platform": "ebay",
            "recordedAt": "2024-03-02T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(req.condition, Some(PriceCondition::Used));
        assert_eq!(req.recorded_at.unwrap().to_rfc3339(), "2024-03-02T08:30:00+00:00");
    }

    #[test]
    fn rejects_null_optional_fields() {
        for field in ["condition", "platform", "recordedAt"] {
            let parsed =
                serde_json::from_value::<CreatePricePointRequest>(json!({ "price": 1, field: null }));
            assert!(parsed.is_err(), "null {field} was accepted");
        }
    }

    #[test]
    fn rejects_unknown_condition() {
        let parsed = serde_json::from_value::<CreatePricePointRequest>(json!({
            "price": 10,
            "condition": "refurbished"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_bad_price_and_platform() {
        let negative = CreatePricePointRequest {
            price: -1.0,
            condition: None,
            platform: None,
            recorded_at: None,
        };
        assert!(negative.validate().is_err());

        let blank_platform = CreatePricePointRequest {
            price: 1.0,
            condition: None,
            platform: Some(String::new()),
            recorded_at: None,
        };
        assert!(blank_platform.validate().is_err());
    }

    #[test]
    fn condition_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PriceCondition::New).unwrap(), json!("new"));
        assert_eq!(serde_json::to_value(PriceCondition::Used).unwrap(), json!("used"));
    }
}
