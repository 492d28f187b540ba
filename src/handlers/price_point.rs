// src/handlers/price_point.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dtos::price_point::{CreatePricePointRequest, CreatedPricePointResponse, DEFAULT_PLATFORM};
use crate::error::AppError;
use crate::handlers::product::find_product;
use crate::models::price_point::PricePoint;
use crate::money::dollars_to_cents;
use crate::state::AppState;

// POST /products/:id/price-points - Record an observed resale price
#[instrument(skip(db_pool, payload))]
pub async fn create_price_point(
    Path(product_id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
    payload: Result<Json<CreatePricePointRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedPricePointResponse>), AppError> {
    find_product(&db_pool, product_id).await?;

    let Json(payload) = payload?;
    payload.validate()?;

    let point = sqlx::query_as::<_, PricePoint>(
        "INSERT INTO price_points (product_id, price_cents, condition, platform, recorded_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, product_id, price_cents, condition, platform, recorded_at",
    )
    .bind(product_id)
    .bind(dollars_to_cents(payload.price))
    .bind(payload.condition.unwrap_or_default())
    .bind(payload.platform.as_deref().unwrap_or(DEFAULT_PLATFORM))
    .bind(payload.recorded_at.unwrap_or_else(Utc::now))
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        // The product can disappear between the lookup and the insert.
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return AppError::not_found("Product not found");
            }
        }
        AppError::from(e)
    })?;

    info!(id = point.id, product_id, "Price point recorded");
    Ok((StatusCode::CREATED, Json(CreatedPricePointResponse::from(point))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_test_pool;
    use crate::models::price_point::PriceCondition;
    use serde_json::json;

    async fn state_with_product() -> (AppState, i64) {
        let state = AppState::new(create_test_pool().await);
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, category, retail_price_cents) VALUES ('Console', 'Gaming', 49999) RETURNING id",
        )
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
        (state, id)
    }

    #[tokio::test]
    async fn records_price_with_defaults() {
        let (state, product_id) = state_with_product().await;
        let req: CreatePricePointRequest = serde_json::from_value(json!({ "price": 525.5 })).unwrap();

        let (status, Json(point)) = create_price_point(Path(product_id), State(state), Ok(Json(req)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(point.product_id, product_id);
        assert_eq!(point.price, 525.5);
        assert_eq!(point.condition, PriceCondition::New);
        assert_eq!(point.platform, DEFAULT_PLATFORM);
    }

    #[tokio::test]
    async fn keeps_given_condition_platform_and_time() {
        let (state, product_id) = state_with_product().await;
        let req: CreatePricePointRequest = serde_json::from_value(json!({
            "price": 400,
            "condition": "used",
            "platform": "marketplace",
            "recordedAt": "2023-11-24T18:00:00Z"
        }))
        .unwrap();

        let (_, Json(point)) = create_price_point(Path(product_id), State(state), Ok(Json(req)))
            .await
            .unwrap();

        assert_eq!(point.condition, PriceCondition::Used);
        assert_eq!(point.platform, "marketplace");
        assert_eq!(point.recorded_at, "2023-11-24T18:00:00+00:00");
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let (state, product_id) = state_with_product().await;
        let req: CreatePricePointRequest = serde_json::from_value(json!({ "price": 1 })).unwrap();
        let result = create_price_point(Path(product_id + 1), State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_product_wins_over_bad_body() {
        let (state, product_id) = state_with_product().await;
        let req: CreatePricePointRequest = serde_json::from_value(json!({ "price": -1 })).unwrap();
        let result = create_price_point(Path(product_id + 1), State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejects_negative_price() {
        let (state, product_id) = state_with_product().await;
        let req: CreatePricePointRequest = serde_json::from_value(json!({ "price": -3 })).unwrap();
        let result = create_price_point(Path(product_id), State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
