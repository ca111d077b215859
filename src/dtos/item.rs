// src/dtos/item.rs
use serde::{Deserialize, Serialize};

use crate::models::item::{Item, ItemSupplier};
use crate::models::wholesaler::Wholesaler;
use crate::repository::NewWholesaler;

#[derive(Debug, Deserialize)]
pub struct RegisterItemRequest {
    #[serde(default)]
    pub item_name: String,
    pub item_description: Option<String>,
    #[serde(default)]
    pub item_purchase_price: i32,
    #[serde(default)]
    pub item_sell_price: i32,
    pub supplier_id: i32,
    #[serde(default)]
    pub item_unit: String,
    #[serde(default)]
    pub item_wholesalers: Vec<WholesalerRequest>,
}

#[derive(Debug, Deserialize)]
pub struct WholesalerRequest {
    pub wholesaler_qty: i32,
    pub wholesaler_price: i32,
}

impl From<&WholesalerRequest> for NewWholesaler {
    fn from(tier: &WholesalerRequest) -> Self {
        Self {
            qty: tier.wholesaler_qty,
            price: tier.wholesaler_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WholesalerResponse {
    pub wholesaler_qty: i32,
    pub wholesaler_price: i32,
}

impl From<Wholesaler> for WholesalerResponse {
    fn from(tier: Wholesaler) -> Self {
        Self {
            wholesaler_qty: tier.wholesaler_qty,
            wholesaler_price: tier.wholesaler_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub item_wholesalers: Vec<WholesalerResponse>,
}

/// One row of a supplier's item listing: supplier pricing plus catalog text.
#[derive(Debug, Serialize)]
pub struct ItemBySupplierResponse {
    pub item_purchase_price: i32,
    pub item_sell_price: i32,
    pub item_unit: String,
    pub item_name: String,
    pub item_description: Option<String>,
}

impl ItemBySupplierResponse {
    pub fn new(link: ItemSupplier, item: Item) -> Self {
        Self {
            item_purchase_price: link.item_purchase_price,
            item_sell_price: link.item_sell_price,
            item_unit: link.item_unit,
            item_name: item.item_name,
            item_description: item.item_description,
        }
    }
}
