use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub retail_price_cents: i64,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Listing row: the product plus how many price points it has.
#[derive(Debug, FromRow)]
pub struct ProductSummary {
    #[sqlx(flatten)]
    pub product: Product,
    pub price_points_count: i64,
}
