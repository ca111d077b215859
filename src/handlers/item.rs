// src/handlers/item.rs
use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::dtos::item::{ItemResponse, RegisterItemRequest, WholesalerResponse};
use crate::dtos::StatusResponse;
use crate::error::{ApiError, AppError, ResultExt};
use crate::repository::{ItemRegistration, DUPLICATE_SUPPLIER_ITEM};
use crate::state::AppState;

const REGISTER_ITEM: &str = "RegisterItem";
const GET_ITEM: &str = "GetItem";

/// Keeps the bulk tier insert well under Postgres's bind-parameter limit.
pub const MAX_WHOLESALERS: usize = 1000;

// POST /item - Register an item for a supplier
#[instrument(skip(state, payload))]
pub async fn register_item(
    State(state): State<AppState>,
    payload: Result<Json<RegisterItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        AppError::validation(format!("error on parsing item input, details = {}", e.body_text()))
            .at(REGISTER_ITEM)
    })?;

    let name = req.item_name.trim();
    if name.is_empty() {
        return Err(AppError::validation("item name cannot be empty").at(REGISTER_ITEM));
    }
    let unit = req.item_unit.trim();
    if unit.is_empty() {
        return Err(AppError::validation("item unit cannot be empty").at(REGISTER_ITEM));
    }
    if req.item_wholesalers.len() > MAX_WHOLESALERS {
        return Err(AppError::validation(format!(
            "an item cannot have more than {MAX_WHOLESALERS} wholesalers"
        ))
        .at(REGISTER_ITEM));
    }

    let existing = state
        .items
        .get_item_by_name(name)
        .await
        .map_err(|e| AppError::store("error on getting item", e))
        .at(REGISTER_ITEM)?;

    // Reuse the catalog row unless this supplier already offers it
    let existing_item_id = match existing {
        Some(item) => {
            let link = state
                .items
                .get_item_supplier(item.item_id, req.supplier_id)
                .await
                .map_err(|e| AppError::store("error on getting item supplier", e))
                .at(REGISTER_ITEM)?;
            if link.is_some() {
                warn!(item_id = item.item_id, supplier_id = req.supplier_id, "duplicate supplier item");
                return Err(AppError::conflict(DUPLICATE_SUPPLIER_ITEM).at(REGISTER_ITEM));
            }
            Some(item.item_id)
        }
        None => None,
    };

    let item_id = state
        .items
        .register_item(ItemRegistration {
            existing_item_id,
            name: name.to_string(),
            description: req.item_description,
            supplier_id: req.supplier_id,
            purchase_price: req.item_purchase_price,
            sell_price: req.item_sell_price,
            unit: unit.to_string(),
            wholesalers: req.item_wholesalers.iter().map(Into::into).collect(),
        })
        .await
        .map_err(|e| AppError::store("error on registering item", e))
        .at(REGISTER_ITEM)?;

    info!(
        item_id,
        supplier_id = req.supplier_id,
        reused = existing_item_id.is_some(),
        tiers = req.item_wholesalers.len(),
        "item registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "successfully created item",
        }),
    ))
}

// GET /item/{itemId} - Item with its wholesale price tiers
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    item_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Path(item_id) = item_id.map_err(|e| {
        AppError::validation(format!("error on parsing item id, details = {}", e.body_text()))
            .at(GET_ITEM)
    })?;

    let item = state
        .items
        .get_item(item_id)
        .await
        .map_err(|e| AppError::store("error on getting item", e))
        .at(GET_ITEM)?
        .ok_or_else(|| AppError::not_found("item not found").at(GET_ITEM))?;

    let tiers = state
        .wholesalers
        .list_wholesalers(item.item_id)
        .await
        .map_err(|e| AppError::store("error on getting wholesalers", e))
        .at(GET_ITEM)?;

    Ok(Json(ItemResponse {
        item_id: item.item_id,
        item_name: item.item_name,
        item_description: item.item_description,
        item_wholesalers: tiers.into_iter().map(WholesalerResponse::from).collect(),
    }))
}
