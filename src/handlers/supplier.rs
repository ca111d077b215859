// src/handlers/supplier.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::dtos::item::ItemBySupplierResponse;
use crate::dtos::supplier::{PagedResults, RegisterSupplierRequest, SupplierResponse};
use crate::dtos::StatusResponse;
use crate::error::{ApiError, AppError, ResultExt};
use crate::models::supplier::SupplierType;
use crate::repository::{NewSupplier, SortOrder, SupplierFilter};
use crate::state::AppState;

const REGISTER_SUPPLIER: &str = "RegisterSupplier";
const GET_SUPPLIER: &str = "GetSupplier";
const LIST_SUPPLIERS: &str = "GetAllSupplierByType";
const LIST_SUPPLIER_ITEMS: &str = "GetItemsBySupplierId";

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct SupplierQueryParams {
    #[serde(rename = "supplierType")]
    pub supplier_type: Option<String>,
    pub page: Option<i64>,
    pub pagesize: Option<i64>,
    pub order: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SupplierQueryParams {
    fn into_filter(self) -> Result<SupplierFilter, AppError> {
        let supplier_type = self
            .supplier_type
            .as_deref()
            .unwrap_or_default()
            .parse::<SupplierType>()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let order = match self.order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::default(),
            Some(o) if o.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            Some(o) if o.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            Some(_) => return Err(AppError::validation("order must be asc or desc")),
        };

        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(AppError::validation("page cannot be negative"));
        }
        let page_size = self.pagesize.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size < 1 {
            return Err(AppError::validation("pagesize must be at least 1"));
        }

        Ok(SupplierFilter {
            supplier_type,
            page,
            page_size,
            order,
            name: non_empty(self.name),
            email: non_empty(self.email),
            address: non_empty(self.address),
        })
    }
}

// POST /supplier - Register a vendor or customer
#[instrument(skip(state, payload))]
pub async fn register_supplier(
    State(state): State<AppState>,
    payload: Result<Json<RegisterSupplierRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        AppError::validation(format!("error on parsing supplier input: {}", e.body_text()))
            .at(REGISTER_SUPPLIER)
    })?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name cannot be empty").at(REGISTER_SUPPLIER));
    }

    let supplier_type = req
        .supplier_type
        .parse::<SupplierType>()
        .map_err(|e| AppError::validation(e.to_string()))
        .at(REGISTER_SUPPLIER)?;

    let supplier = state
        .suppliers
        .create_supplier(NewSupplier {
            name: name.to_string(),
            email: req.email,
            telephone: req.telephone,
            web: req.web,
            npwp: req.npwp,
            address: req.address,
            supplier_type,
        })
        .await
        .map_err(|e| AppError::store("error on registering supplier", e))
        .at(REGISTER_SUPPLIER)?;

    info!(supplier_id = supplier.supplier_id, %supplier_type, "supplier registered");

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "supplier registered",
        }),
    ))
}

// GET /supplier/{supplierId} - Single supplier
#[instrument(skip(state))]
pub async fn get_supplier(
    State(state): State<AppState>,
    supplier_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<SupplierResponse>, ApiError> {
    let Path(supplier_id) = supplier_id.map_err(|e| {
        AppError::validation(format!("error on parsing supplier id, details = {}", e.body_text()))
            .at(GET_SUPPLIER)
    })?;

    let supplier = state
        .suppliers
        .get_supplier(supplier_id)
        .await
        .map_err(|e| AppError::store("error on getting supplier", e))
        .at(GET_SUPPLIER)?
        .ok_or_else(|| AppError::not_found("supplier not found").at(GET_SUPPLIER))?;

    Ok(Json(SupplierResponse::from(supplier)))
}

// GET /suppliers - Paged suppliers of one type
#[instrument(skip(state))]
pub async fn list_suppliers(
    State(state): State<AppState>,
    params: Result<Query<SupplierQueryParams>, QueryRejection>,
) -> Result<Json<PagedResults<SupplierResponse>>, ApiError> {
    let Query(params) = params.map_err(|e| {
        AppError::validation(format!("error on parsing supplier query: {}", e.body_text()))
            .at(LIST_SUPPLIERS)
    })?;
    let filter = params.into_filter().at(LIST_SUPPLIERS)?;

    let (suppliers, total_records) = state
        .suppliers
        .list_suppliers(&filter)
        .await
        .map_err(|e| AppError::store("error on listing suppliers", e))
        .at(LIST_SUPPLIERS)?;

    Ok(Json(PagedResults {
        page: filter.page,
        page_size: filter.page_size,
        data: suppliers.into_iter().map(SupplierResponse::from).collect(),
        total_records,
    }))
}

// GET /supplier/{supplierId}/items - Every item a supplier offers
//
// All-or-nothing: the first failed item lookup fails the whole request.
#[instrument(skip(state))]
pub async fn list_supplier_items(
    State(state): State<AppState>,
    supplier_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<ItemBySupplierResponse>>, ApiError> {
    let Path(supplier_id) = supplier_id.map_err(|e| {
        AppError::validation(format!("error on parsing supplier id, details = {}", e.body_text()))
            .at(LIST_SUPPLIER_ITEMS)
    })?;

    let links = state
        .items
        .list_item_suppliers(supplier_id)
        .await
        .map_err(|e| {
            error!(error = %e, supplier_id, "Failed to fetch item suppliers");
            AppError::validation(format!(
                "error on getting item supplier by supplier id, details = {e}"
            ))
        })
        .at(LIST_SUPPLIER_ITEMS)?;

    let mut items = Vec::with_capacity(links.len());
    for link in links {
        let item = state
            .items
            .get_item(link.item_id)
            .await
            .map_err(|e| {
                error!(error = %e, item_id = link.item_id, "Failed to fetch item");
                AppError::validation(format!("error on getting item, details = {e}"))
            })
            .at(LIST_SUPPLIER_ITEMS)?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "error on getting item, details = item {} not found",
                    link.item_id
                ))
                .at(LIST_SUPPLIER_ITEMS)
            })?;

        items.push(ItemBySupplierResponse::new(link, item));
    }

    Ok(Json(items))
}
