use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PriceCondition {
    #[default]
    New,
    Used,
}

#[derive(Debug, Clone, FromRow)]
pub struct PricePoint {
    pub id: i64,
    pub product_id: i64,
    pub price_cents: i64,
    pub condition: PriceCondition,
    pub platform: String,
    pub recorded_at: DateTime<Utc>,
}
