// src/handlers/product.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, info, instrument};

use crate::dtos::product::{
    CreateProductRequest, ProductDetailResponse, ProductListItem, ProductResponse,
    UpdateProductRequest,
};
use crate::error::AppError;
use crate::models::price_point::PricePoint;
use crate::models::product::{Product, ProductSummary};
use crate::money::dollars_to_cents;
use crate::state::AppState;

/// Most recent price points considered for analytics and returned with a product.
pub const PRICE_HISTORY_LIMIT: i64 = 200;

pub const DEFAULT_SOURCE: &str = "manual";

const PRODUCT_COLUMNS: &str = "id, name, category, retail_price_cents, source, created_at";

pub(crate) async fn find_product(pool: &SqlitePool, id: i64) -> Result<Product, AppError> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))
}

// GET /products - List all products, newest first
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductListItem>>, AppError> {
    match sqlx::query_as::<_, ProductSummary>(
        "SELECT p.id, p.name, p.category, p.retail_price_cents, p.source, p.created_at,
                (SELECT COUNT(*) FROM price_points pp WHERE pp.product_id = p.id) AS price_points_count
         FROM products p
         ORDER BY p.created_at DESC, p.id DESC",
    )
    .fetch_all(&state.db_pool)
    .await
    {
        Ok(products) => {
            let response = products.into_iter().map(ProductListItem::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/:id - Product with analytics and recent price history
#[instrument(skip(db_pool))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = find_product(&db_pool, id).await?;

    let price_points = sqlx::query_as::<_, PricePoint>(
        "SELECT id, product_id, price_cents, condition, platform, recorded_at
         FROM price_points
         WHERE product_id = ?
         ORDER BY recorded_at DESC, id DESC
         LIMIT ?",
    )
    .bind(id)
    .bind(PRICE_HISTORY_LIMIT)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(ProductDetailResponse::new(product, price_points)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, category, retail_price_cents, source, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(dollars_to_cents(payload.retail_price))
    .bind(payload.source.as_deref().unwrap_or(DEFAULT_SOURCE))
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await?;

    info!(id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PATCH /products/:id - Partial update
#[instrument(skip(state, payload))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    // Unknown ids are reported before body problems.
    find_product(&state.db_pool, id).await?;

    let Json(payload) = payload?;
    payload.validate()?;

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET
         name = COALESCE(?, name),
         category = COALESCE(?, category),
         retail_price_cents = COALESCE(?, retail_price_cents),
         source = COALESCE(?, source)
         WHERE id = ?
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.category)
    .bind(payload.retail_price.map(dollars_to_cents))
    .bind(payload.source)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product and its price history
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let mut tx = state.db_pool.begin().await?;

    sqlx::query("DELETE FROM price_points WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    tx.commit().await?;
    info!(id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
