use std::fmt;
use std::str::FromStr;

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Supplier {
    pub supplier_id: i32,
    pub supplier_name: String,
    pub supplier_email: Option<String>,
    pub supplier_telephone: Option<String>,
    pub supplier_web: Option<String>,
    pub supplier_npwp: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_type: String,
}

/// Which side of the business a supplier sits on.
///
/// Parsing is case-insensitive; the stored form is always upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierType {
    Vendor,
    Customer,
}

impl SupplierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierType::Vendor => "VENDOR",
            SupplierType::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for SupplierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("supplier type must be vendor or customer")]
pub struct ParseSupplierTypeError;

impl FromStr for SupplierType {
    type Err = ParseSupplierTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vendor" => Ok(SupplierType::Vendor),
            "customer" => Ok(SupplierType::Customer),
            _ => Err(ParseSupplierTypeError),
        }
    }
}
