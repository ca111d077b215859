// src/dtos/supplier.rs
use serde::{Deserialize, Serialize};

use crate::models::supplier::Supplier;

#[derive(Debug, Deserialize)]
pub struct RegisterSupplierRequest {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub web: Option<String>,
    pub npwp: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type", default)]
    pub supplier_type: String,
}

#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    pub supplier_id: i32,
    pub supplier_name: String,
    pub supplier_email: Option<String>,
    pub supplier_telephone: Option<String>,
    pub supplier_web: Option<String>,
    pub supplier_npwp: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_type: String,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            supplier_id: supplier.supplier_id,
            supplier_name: supplier.supplier_name,
            supplier_email: supplier.supplier_email,
            supplier_telephone: supplier.supplier_telephone,
            supplier_web: supplier.supplier_web,
            supplier_npwp: supplier.supplier_npwp,
            supplier_address: supplier.supplier_address,
            supplier_type: supplier.supplier_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagedResults<T> {
    pub page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
    pub total_records: i64,
}
