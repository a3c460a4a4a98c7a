//! `migrate` command: apply schema migrations and exit

use anyhow::{Context, Result};
use tracing::info;

use crate::storage::SeaOrmStorage;
use crate::storage::backend::infer_backend_from_url;

pub async fn run_migrate() -> Result<()> {
    let config = crate::config::get_config();
    let database_url = &config.database.database_url;

    let backend = infer_backend_from_url(database_url)?;

    // 无论配置如何，此模式都执行迁移
    let mut db_config = config.database.clone();
    db_config.run_migrations = true;

    let storage = SeaOrmStorage::new(database_url, &backend, &db_config)
        .await
        .context("Failed to apply migrations")?;

    info!("Migrations applied to {} database", backend.to_uppercase());

    storage
        .get_db()
        .clone()
        .close()
        .await
        .context("Failed to close database pool")?;

    Ok(())
}
