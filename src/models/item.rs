use sqlx::FromRow;

/// Catalog entry shared by every supplier offering an item with this name.
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub item_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
}

/// Per-supplier offer of an item: what the supplier buys and sells it for.
#[derive(Debug, Clone, FromRow)]
pub struct ItemSupplier {
    pub item_id: i32,
    pub supplier_id: i32,
    pub item_purchase_price: i32,
    pub item_sell_price: i32,
    pub item_unit: String,
}
