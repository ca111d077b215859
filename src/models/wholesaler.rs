use sqlx::FromRow;

/// Wholesale price tier: `wholesaler_price` applies from `wholesaler_qty` units upward.
#[derive(Debug, Clone, FromRow)]
pub struct Wholesaler {
    pub item_id: i32,
    pub wholesaler_qty: i32,
    pub wholesaler_price: i32,
}
