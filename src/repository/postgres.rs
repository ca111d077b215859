// src/repository/postgres.rs
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use super::{
    ItemRegistration, ItemRepository, NewSupplier, NewWholesaler, Result, StoreError,
    SupplierFilter, SupplierRepository, WholesalerRepository, DUPLICATE_SUPPLIER_ITEM,
};
use crate::models::item::{Item, ItemSupplier};
use crate::models::supplier::Supplier;
use crate::models::wholesaler::Wholesaler;

const SUPPLIER_COLUMNS: &str = "supplier_id, supplier_name, supplier_email, supplier_telephone, \
     supplier_web, supplier_npwp, supplier_address, supplier_type";

/// Postgres-backed implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error, conflict: &str, missing: &str) -> StoreError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.into_owned());

    match code.as_deref() {
        Some("23505") => StoreError::Conflict(conflict.to_string()),
        Some("23503") => StoreError::MissingReference(missing.to_string()),
        _ => StoreError::Database(err),
    }
}

fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_supplier_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &SupplierFilter) {
    builder
        .push(" WHERE supplier_type = ")
        .push_bind(filter.supplier_type.as_str());

    if let Some(name) = &filter.name {
        builder.push(" AND supplier_name ILIKE ").push_bind(like_pattern(name));
    }
    if let Some(email) = &filter.email {
        builder.push(" AND supplier_email ILIKE ").push_bind(like_pattern(email));
    }
    if let Some(address) = &filter.address {
        builder.push(" AND supplier_address ILIKE ").push_bind(like_pattern(address));
    }
}

async fn insert_wholesalers(
    conn: &mut PgConnection,
    item_id: i32,
    tiers: &[NewWholesaler],
) -> Result<()> {
    if tiers.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO wholesalers (item_id, wholesaler_qty, wholesaler_price) ",
    );
    builder.push_values(tiers, |mut row, tier| {
        row.push_bind(item_id)
            .push_bind(tier.qty)
            .push_bind(tier.price);
    });

    builder.build().execute(&mut *conn).await?;
    Ok(())
}

#[async_trait]
impl SupplierRepository for PgStore {
    async fn create_supplier(&self, supplier: NewSupplier) -> Result<Supplier> {
        let query = format!(
            "INSERT INTO suppliers (supplier_name, supplier_email, supplier_telephone,
                                    supplier_web, supplier_npwp, supplier_address, supplier_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SUPPLIER_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Supplier>(&query)
            .bind(&supplier.name)
            .bind(&supplier.email)
            .bind(&supplier.telephone)
            .bind(&supplier.web)
            .bind(&supplier.npwp)
            .bind(&supplier.address)
            .bind(supplier.supplier_type.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn get_supplier(&self, supplier_id: i32) -> Result<Option<Supplier>> {
        let query = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE supplier_id = $1");

        let supplier = sqlx::query_as::<_, Supplier>(&query)
            .bind(supplier_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<(Vec<Supplier>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM suppliers");
        push_supplier_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page =
            QueryBuilder::<Postgres>::new(format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers"));
        push_supplier_filters(&mut page, filter);
        page.push(" ORDER BY supplier_id ")
            .push(filter.order.as_sql())
            .push(" LIMIT ")
            .push_bind(filter.page_size)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let suppliers = page
            .build_query_as::<Supplier>()
            .fetch_all(&self.pool)
            .await?;

        Ok((suppliers, total))
    }
}

#[async_trait]
impl ItemRepository for PgStore {
    async fn get_item(&self, item_id: i32) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT item_id, item_name, item_description FROM items WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn get_item_by_name(&self, name: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT item_id, item_name, item_description FROM items WHERE item_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn get_item_supplier(
        &self,
        item_id: i32,
        supplier_id: i32,
    ) -> Result<Option<ItemSupplier>> {
        let link = sqlx::query_as::<_, ItemSupplier>(
            "SELECT item_id, supplier_id, item_purchase_price, item_sell_price, item_unit
             FROM item_suppliers
             WHERE item_id = $1 AND supplier_id = $2",
        )
        .bind(item_id)
        .bind(supplier_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn list_item_suppliers(&self, supplier_id: i32) -> Result<Vec<ItemSupplier>> {
        let links = sqlx::query_as::<_, ItemSupplier>(
            "SELECT item_id, supplier_id, item_purchase_price, item_sell_price, item_unit
             FROM item_suppliers
             WHERE supplier_id = $1
             ORDER BY item_id",
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn register_item(&self, registration: ItemRegistration) -> Result<i32> {
        // Dropping `tx` before commit rolls every write back.
        let mut tx = self.pool.begin().await?;

        let item_id = match registration.existing_item_id {
            Some(item_id) => item_id,
            // A concurrent registration of the same name resolves to the same row.
            None => {
                sqlx::query_scalar::<_, i32>(
                    "INSERT INTO items (item_name, item_description)
                     VALUES ($1, $2)
                     ON CONFLICT (item_name) DO UPDATE SET item_name = EXCLUDED.item_name
                     RETURNING item_id",
                )
                .bind(&registration.name)
                .bind(&registration.description)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        sqlx::query(
            "INSERT INTO item_suppliers
                 (item_id, supplier_id, item_purchase_price, item_sell_price, item_unit)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(item_id)
        .bind(registration.supplier_id)
        .bind(registration.purchase_price)
        .bind(registration.sell_price)
        .bind(&registration.unit)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                DUPLICATE_SUPPLIER_ITEM,
                &format!("supplier {} does not exist", registration.supplier_id),
            )
        })?;

        insert_wholesalers(&mut tx, item_id, &registration.wholesalers).await?;

        tx.commit().await?;
        Ok(item_id)
    }
}

#[async_trait]
impl WholesalerRepository for PgStore {
    async fn list_wholesalers(&self, item_id: i32) -> Result<Vec<Wholesaler>> {
        let tiers = sqlx::query_as::<_, Wholesaler>(
            "SELECT item_id, wholesaler_qty, wholesaler_price
             FROM wholesalers
             WHERE item_id = $1
             ORDER BY wholesaler_qty",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }
}
