use anyhow::{Context, Result};
use tracing::info;

use crate::core::config::DatabaseConfig;
use crate::stores::account_store::AccountStore;

/// Create the database directory if needed and open the account store
pub async fn open_store(config: &DatabaseConfig) -> Result<AccountStore> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create data directory: {}", parent.display()))?;
    }

    let store = AccountStore::open(&config.path)
        .await
        .context(format!("Failed to open account database: {}", config.path.display()))?;

    let accounts = store.count().await.context("Failed to count accounts")?;

    info!(
        path = %config.path.display(),
        accounts,
        "Account store opened"
    );

    Ok(store)
}
