use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres, Transaction};
use standard_error::{Interpolate, StandardError};

use crate::{conf::Settings, prelude::Result};

pub fn db_pool(settings: &Settings) -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        let settings = Settings::new()
            .map_err(|e| StandardError::new("ERR-CONF-000").interpolate_err(e.to_string()))?;
        let db_pool = Arc::new(db_pool(&settings)?);
        Ok(AppState {
            db_pool,
            settings: Arc::new(settings),
        })
    }
}

#[async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait]
impl GetTxn for Arc<PgPool> {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}
