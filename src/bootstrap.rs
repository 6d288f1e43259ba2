//! Wiring shared by both binaries: configuration, store and clock.

use std::sync::Arc;

use stockbook_config::{Config, ConfigManager};
use stockbook_core::Inventory;
use stockbook_storage_json::JsonTableStore;
use tracing::info;

use crate::{utils::SystemClock, AppError};

/// Loads the saved configuration from the default location and applies environment overrides.
pub fn load_config() -> Result<(ConfigManager, Config), AppError> {
    let manager = ConfigManager::default_location()?;
    let config = load_config_from(&manager)?;
    Ok((manager, config))
}

pub fn load_config_from(manager: &ConfigManager) -> Result<Config, AppError> {
    let mut config = manager.load()?;
    config.apply_env_overrides()?;
    Ok(config)
}

/// Opens the JSON table store under the configured data root.
pub fn open_inventory(config: &Config) -> Result<Arc<Inventory>, AppError> {
    let root = config.resolve_data_root();
    let store = JsonTableStore::new(&root)?;
    info!(root = %root.display(), "table store opened");
    Ok(Arc::new(Inventory::new(Arc::new(store), Arc::new(SystemClock))))
}
