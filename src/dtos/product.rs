// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::dtos::price_point::PricePointResponse;
use crate::dtos::{non_null, validate_price, validate_text};
use crate::error::AppError;
use crate::models::price_point::PricePoint;
use crate::models::product::{Product, ProductSummary};
use crate::money::cents_to_dollars;
use crate::scoring::{compute_opportunity_score, compute_volatility_pct};

const NAME_MAX_CHARS: usize = 120;
const CATEGORY_MAX_CHARS: usize = 60;
const SOURCE_MAX_CHARS: usize = 60;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub retail_price: f64,
    #[serde(default, deserialize_with = "non_null")]
    pub source: Option<String>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_text("name", &self.name, NAME_MAX_CHARS)?;
        validate_text("category", &self.category, CATEGORY_MAX_CHARS)?;
        validate_price("retailPrice", self.retail_price)?;
        if let Some(source) = &self.source {
            validate_text("source", source, SOURCE_MAX_CHARS)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub retail_price: Option<f64>,
    #[serde(default, deserialize_with = "non_null")]
    pub source: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validate_text("name", name, NAME_MAX_CHARS)?;
        }
        if let Some(category) = &self.category {
            validate_text("category", category, CATEGORY_MAX_CHARS)?;
        }
        if let Some(retail_price) = self.retail_price {
            validate_price("retailPrice", retail_price)?;
        }
        if let Some(source) = &self.source {
            validate_text("source", source, SOURCE_MAX_CHARS)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub retail_price: f64,
    pub source: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub price_points_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub analytics: ProductAnalytics,
    pub price_points: Vec<PricePointResponse>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalytics {
    pub recent_resale_price: Option<f64>,
    pub volatility_pct: f64,
    pub opportunity_score: u8,
}

impl ProductAnalytics {
    /// `prices_cents` must be ordered newest first.
    pub fn from_price_history(retail_price_cents: i64, prices_cents: &[i64]) -> Self {
        let volatility_pct = compute_volatility_pct(prices_cents);
        let recent_resale_cents = prices_cents.first().copied();
        let opportunity_score =
            compute_opportunity_score(retail_price_cents, recent_resale_cents, volatility_pct);

        Self {
            // A zero resale reads as "no data", same as the score.
            recent_resale_price: recent_resale_cents
                .filter(|&cents| cents != 0)
                .map(cents_to_dollars),
            volatility_pct: (volatility_pct * 10.0).round() / 10.0,
            opportunity_score,
        }
    }
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            retail_price: cents_to_dollars(product.retail_price_cents),
            source: product.source,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

impl From<ProductSummary> for ProductListItem {
    fn from(summary: ProductSummary) -> Self {
        Self {
            product: summary.product.into(),
            price_points_count: summary.price_points_count,
        }
    }
}

impl ProductDetailResponse {
    pub fn new(product: Product, price_points: Vec<PricePoint>) -> Self {
        let prices: Vec<i64> = price_points.iter().map(|p| p.price_cents).collect();
        let analytics = ProductAnalytics::from_price_history(product.retail_price_cents, &prices);

        Self {
            product: product.into(),
            analytics,
            price_points: price_points.into_iter().map(PricePointResponse::from).collect(),
        }
    }
}
