use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::supplier::{
    get_supplier, list_supplier_items, list_suppliers, register_supplier,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/supplier", post(register_supplier))
        .route("/supplier/{supplierId}", get(get_supplier))
        .route("/supplier/{supplierId}/items", get(list_supplier_items))
        .route("/suppliers", get(list_suppliers))
}
