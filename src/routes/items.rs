use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::item::{get_item, register_item};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/item", post(register_item))
        .route("/item/{itemId}", get(get_item))
}
