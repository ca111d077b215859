// src/repository/memory.rs
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    ItemRegistration, ItemRepository, NewSupplier, Result, SortOrder, StoreError, SupplierFilter,
    SupplierRepository, WholesalerRepository, DUPLICATE_SUPPLIER_ITEM,
};
use crate::models::item::{Item, ItemSupplier};
use crate::models::supplier::Supplier;
use crate::models::wholesaler::Wholesaler;

#[derive(Debug, Clone, Default)]
struct Tables {
    suppliers: Vec<Supplier>,
    items: Vec<Item>,
    item_suppliers: Vec<ItemSupplier>,
    wholesalers: Vec<Wholesaler>,
    next_supplier_id: i32,
    next_item_id: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

/// In-memory store with the same contract as the Postgres one.
///
/// Registrations are applied to a copy of the tables and swapped in on
/// success, so a failed write leaves nothing behind.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_wholesaler_writes: bool,
    fail_item_reads: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose price tier inserts always fail.
    pub fn failing_wholesaler_writes() -> Self {
        Self {
            fail_wholesaler_writes: true,
            ..Self::default()
        }
    }

    /// A store whose lookups by item id always fail.
    pub fn failing_item_reads() -> Self {
        Self {
            fail_item_reads: true,
            ..Self::default()
        }
    }

    /// Links a supplier to an item id with no catalog row behind it.
    pub async fn insert_dangling_link(&self, supplier_id: i32, item_id: i32) {
        self.tables.write().await.item_suppliers.push(ItemSupplier {
            item_id,
            supplier_id,
            item_purchase_price: 0,
            item_sell_price: 0,
            item_unit: "pcs".to_string(),
        });
    }

    pub async fn item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }

    pub async fn wholesalers_for(&self, item_id: i32) -> usize {
        self.tables
            .read()
            .await
            .wholesalers
            .iter()
            .filter(|w| w.item_id == item_id)
            .count()
    }
}

fn contains_ignore_case(column: Option<&str>, needle: &Option<String>) -> bool {
    match needle {
        None => true,
        Some(needle) => column
            .map(|value| value.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

#[async_trait]
impl SupplierRepository for InMemoryStore {
    async fn create_supplier(&self, supplier: NewSupplier) -> Result<Supplier> {
        let mut tables = self.tables.write().await;
        let supplier = Supplier {
            supplier_id: Tables::next_id(&mut tables.next_supplier_id),
            supplier_name: supplier.name,
            supplier_email: supplier.email,
            supplier_telephone: supplier.telephone,
            supplier_web: supplier.web,
            supplier_npwp: supplier.npwp,
            supplier_address: supplier.address,
            supplier_type: supplier.supplier_type.as_str().to_string(),
        };
        tables.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn get_supplier(&self, supplier_id: i32) -> Result<Option<Supplier>> {
        let tables = self.tables.read().await;
        Ok(tables
            .suppliers
            .iter()
            .find(|s| s.supplier_id == supplier_id)
            .cloned())
    }

    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<(Vec<Supplier>, i64)> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Supplier> = tables
            .suppliers
            .iter()
            .filter(|s| s.supplier_type == filter.supplier_type.as_str())
            .filter(|s| contains_ignore_case(Some(s.supplier_name.as_str()), &filter.name))
            .filter(|s| contains_ignore_case(s.supplier_email.as_deref(), &filter.email))
            .filter(|s| contains_ignore_case(s.supplier_address.as_deref(), &filter.address))
            .collect();

        matching.sort_by_key(|s| s.supplier_id);
        if filter.order == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.page_size as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn get_item(&self, item_id: i32) -> Result<Option<Item>> {
        if self.fail_item_reads {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.item_id == item_id).cloned())
    }

    async fn get_item_by_name(&self, name: &str) -> Result<Option<Item>> {
        let tables = self.tables.read().await;
        Ok(tables.items.iter().find(|i| i.item_name == name).cloned())
    }

    async fn get_item_supplier(
        &self,
        item_id: i32,
        supplier_id: i32,
    ) -> Result<Option<ItemSupplier>> {
        let tables = self.tables.read().await;
        Ok(tables
            .item_suppliers
            .iter()
            .find(|l| l.item_id == item_id && l.supplier_id == supplier_id)
            .cloned())
    }

    async fn list_item_suppliers(&self, supplier_id: i32) -> Result<Vec<ItemSupplier>> {
        let tables = self.tables.read().await;
        Ok(tables
            .item_suppliers
            .iter()
            .filter(|l| l.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn register_item(&self, registration: ItemRegistration) -> Result<i32> {
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();

        if !staged
            .suppliers
            .iter()
            .any(|s| s.supplier_id == registration.supplier_id)
        {
            return Err(StoreError::MissingReference(format!(
                "supplier {} does not exist",
                registration.supplier_id
            )));
        }

        let existing = registration.existing_item_id.or_else(|| {
            staged
                .items
                .iter()
                .find(|i| i.item_name == registration.name)
                .map(|i| i.item_id)
        });
        let item_id = match existing {
            Some(item_id) => item_id,
            None => {
                let item_id = Tables::next_id(&mut staged.next_item_id);
                staged.items.push(Item {
                    item_id,
                    item_name: registration.name.clone(),
                    item_description: registration.description.clone(),
                });
                item_id
            }
        };

        if staged
            .item_suppliers
            .iter()
            .any(|l| l.item_id == item_id && l.supplier_id == registration.supplier_id)
        {
            return Err(StoreError::Conflict(DUPLICATE_SUPPLIER_ITEM.to_string()));
        }
        staged.item_suppliers.push(ItemSupplier {
            item_id,
            supplier_id: registration.supplier_id,
            item_purchase_price: registration.purchase_price,
            item_sell_price: registration.sell_price,
            item_unit: registration.unit.clone(),
        });

        if !registration.wholesalers.is_empty() && self.fail_wholesaler_writes {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        for tier in &registration.wholesalers {
            staged.wholesalers.push(Wholesaler {
                item_id,
                wholesaler_qty: tier.qty,
                wholesaler_price: tier.price,
            });
        }

        *tables = staged;
        Ok(item_id)
    }
}

#[async_trait]
impl WholesalerRepository for InMemoryStore {
    async fn list_wholesalers(&self, item_id: i32) -> Result<Vec<Wholesaler>> {
        let tables = self.tables.read().await;
        let mut tiers: Vec<Wholesaler> = tables
            .wholesalers
            .iter()
            .filter(|w| w.item_id == item_id)
            .cloned()
            .collect();
        tiers.sort_by_key(|w| w.wholesaler_qty);
        Ok(tiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::supplier::SupplierType;
    use crate::repository::NewWholesaler;

    fn supplier(name: &str, supplier_type: SupplierType) -> NewSupplier {
        NewSupplier {
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            telephone: None,
            web: None,
            npwp: None,
            address: None,
            supplier_type,
        }
    }

    fn registration(name: &str, supplier_id: i32, tiers: Vec<NewWholesaler>) -> ItemRegistration {
        ItemRegistration {
            existing_item_id: None,
            name: name.to_string(),
            description: None,
            supplier_id,
            purchase_price: 9000,
            sell_price: 11000,
            unit: "kg".to_string(),
            wholesalers: tiers,
        }
    }

    fn vendors(page: i64, page_size: i64) -> SupplierFilter {
        SupplierFilter {
            supplier_type: SupplierType::Vendor,
            page,
            page_size,
            order: SortOrder::Asc,
            name: None,
            email: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn list_counts_before_paging() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .create_supplier(supplier(&format!("Vendor{i}"), SupplierType::Vendor))
                .await
                .unwrap();
        }
        store
            .create_supplier(supplier("Buyer", SupplierType::Customer))
            .await
            .unwrap();

        let (page, total) = store.list_suppliers(&vendors(1, 2)).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].supplier_name, "Vendor2");

        let (last, _) = store.list_suppliers(&vendors(2, 2)).await.unwrap();
        assert_eq!(last.len(), 1);
    }

    #[tokio::test]
    async fn list_filters_case_insensitively_and_orders() {
        let store = InMemoryStore::new();
        store.create_supplier(supplier("Acme Foods", SupplierType::Vendor)).await.unwrap();
        store.create_supplier(supplier("ACME Tools", SupplierType::Vendor)).await.unwrap();
        store.create_supplier(supplier("Globex", SupplierType::Vendor)).await.unwrap();

        let mut filter = vendors(0, 20);
        filter.name = Some("acme".to_string());
        filter.order = SortOrder::Desc;

        let (page, total) = store.list_suppliers(&filter).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(page[0].supplier_name, "ACME Tools");
        assert_eq!(page[1].supplier_name, "Acme Foods");
    }

    #[tokio::test]
    async fn register_reuses_item_row_across_suppliers() {
        let store = InMemoryStore::new();
        let first = store.create_supplier(supplier("A", SupplierType::Vendor)).await.unwrap();
        let second = store.create_supplier(supplier("B", SupplierType::Vendor)).await.unwrap();

        let a = store
            .register_item(registration("Rice", first.supplier_id, vec![]))
            .await
            .unwrap();
        let b = store
            .register_item(registration("Rice", second.supplier_id, vec![]))
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(store.item_count().await, 1);
        assert_eq!(store.list_item_suppliers(second.supplier_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_link() {
        let store = InMemoryStore::new();
        let vendor = store.create_supplier(supplier("A", SupplierType::Vendor)).await.unwrap();

        store
            .register_item(registration("Rice", vendor.supplier_id, vec![]))
            .await
            .unwrap();
        let err = store
            .register_item(registration("Rice", vendor.supplier_id, vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_requires_existing_supplier() {
        let store = InMemoryStore::new();

        let err = store
            .register_item(registration("Rice", 42, vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::MissingReference(_)));
        assert_eq!(store.item_count().await, 0);
    }

    #[tokio::test]
    async fn failed_tier_write_rolls_back_item() {
        let store = InMemoryStore::failing_wholesaler_writes();
        let vendor = store.create_supplier(supplier("A", SupplierType::Vendor)).await.unwrap();

        let tiers = vec![NewWholesaler { qty: 10, price: 8500 }];
        let err = store
            .register_item(registration("Rice", vendor.supplier_id, tiers))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(store.item_count().await, 0);
        assert!(store.list_item_suppliers(vendor.supplier_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tiers_list_by_quantity() {
        let store = InMemoryStore::new();
        let vendor = store.create_supplier(supplier("A", SupplierType::Vendor)).await.unwrap();

        let tiers = vec![
            NewWholesaler { qty: 100, price: 8000 },
            NewWholesaler { qty: 10, price: 8500 },
        ];
        let item_id = store
            .register_item(registration("Rice", vendor.supplier_id, tiers))
            .await
            .unwrap();

        let listed = store.list_wholesalers(item_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].wholesaler_qty, 10);
        assert_eq!(listed[1].wholesaler_price, 8000);
    }
}
