use axum::{routing::post, Router};
use crate::handlers::price_point::create_price_point;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/{id}/price-points", post(create_price_point))
}
