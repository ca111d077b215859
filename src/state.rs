// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::postgres::PgStore;
use crate::repository::{ItemRepository, SupplierRepository, WholesalerRepository};

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub wholesalers: Arc<dyn WholesalerRepository>,
    pub suppliers: Arc<dyn SupplierRepository>,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        Self::with_store(Arc::new(PgStore::new(db_pool)))
    }

    /// Serves every repository from one store.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: ItemRepository + WholesalerRepository + SupplierRepository,
    {
        Self {
            items: store.clone(),
            wholesalers: store.clone(),
            suppliers: store,
        }
    }
}
