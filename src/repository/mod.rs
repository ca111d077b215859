// src/repository/mod.rs
pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::models::item::{Item, ItemSupplier};
use crate::models::supplier::{Supplier, SupplierType};
use crate::models::wholesaler::Wholesaler;

pub const DUPLICATE_SUPPLIER_ITEM: &str = "a supplier cannot have the same item";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule rejected the write.
    #[error("{0}")]
    Conflict(String),
    /// The write referenced a row that does not exist.
    #[error("{0}")]
    MissingReference(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub name: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub web: Option<String>,
    pub npwp: Option<String>,
    pub address: Option<String>,
    pub supplier_type: SupplierType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Narrowing and windowing for a supplier listing.
///
/// Text filters match case-insensitively anywhere in the column.
#[derive(Debug, Clone)]
pub struct SupplierFilter {
    pub supplier_type: SupplierType,
    pub page: i64,
    pub page_size: i64,
    pub order: SortOrder,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl SupplierFilter {
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWholesaler {
    pub qty: i32,
    pub price: i32,
}

/// Everything written by a single item registration.
///
/// When `existing_item_id` is set the catalog row is reused and only the
/// supplier link and price tiers are written.
#[derive(Debug, Clone)]
pub struct ItemRegistration {
    pub existing_item_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub supplier_id: i32,
    pub purchase_price: i32,
    pub sell_price: i32,
    pub unit: String,
    pub wholesalers: Vec<NewWholesaler>,
}

#[async_trait]
pub trait SupplierRepository: Send + Sync + 'static {
    async fn create_supplier(&self, supplier: NewSupplier) -> Result<Supplier>;

    async fn get_supplier(&self, supplier_id: i32) -> Result<Option<Supplier>>;

    /// Returns one page of matching suppliers and the unpaginated match count.
    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<(Vec<Supplier>, i64)>;
}

#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    async fn get_item(&self, item_id: i32) -> Result<Option<Item>>;

    /// Exact, case-sensitive lookup.
    async fn get_item_by_name(&self, name: &str) -> Result<Option<Item>>;

    async fn get_item_supplier(&self, item_id: i32, supplier_id: i32)
        -> Result<Option<ItemSupplier>>;

    async fn list_item_suppliers(&self, supplier_id: i32) -> Result<Vec<ItemSupplier>>;

    /// Writes the item (unless reused), its supplier link and its price tiers
    /// atomically. Returns the resolved item id.
    async fn register_item(&self, registration: ItemRegistration) -> Result<i32>;
}

#[async_trait]
pub trait WholesalerRepository: Send + Sync + 'static {
    async fn list_wholesalers(&self, item_id: i32) -> Result<Vec<Wholesaler>>;
}
