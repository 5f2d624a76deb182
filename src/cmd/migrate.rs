use crate::{conf::Settings, prelude::Result};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions};
use standard_error::{Interpolate, StandardError};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn apply() -> Result<()> {
    let settings = Settings::new()
        .map_err(|e| StandardError::new("ERR-CONF-000").interpolate_err(e.to_string()))?;
    let pool = PgPoolOptions::new()
        .connect(&settings.database_url)
        .await
        .map_err(|e| StandardError::new("ERR-DB-000").interpolate_err(e.to_string()))?;

    tracing::debug!("connected to db");
    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| StandardError::new("ERR-DB-000").interpolate_err(e.to_string()))?;

    println!("Migrations applied successfully");
    Ok(())
}
