pub mod products;
pub mod price_points;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .merge(products::routes())
        .merge(price_points::routes())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}
