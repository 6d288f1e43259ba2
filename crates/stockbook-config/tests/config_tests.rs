use std::path::PathBuf;

use stockbook_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.bind_address, "127.0.0.1:5000");
    assert!(cfg.data_root.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.backups_dir().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.bind_address = "0.0.0.0:8080".to_string();
    cfg.data_root = Some(PathBuf::from("/srv/stockbook"));
    cfg.locale = "en_GB".to_string();

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn older_files_without_new_fields_still_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"currency":"EUR","locale":"de-DE"}"#).unwrap();
    let manager = ConfigManager::new(path, dir.path().join("backups"));

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.bind_address, "127.0.0.1:5000");
    assert!(loaded.ui_color_enabled);
}

#[test]
fn corrupt_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{").unwrap();
    let manager = ConfigManager::new(path, dir.path().join("backups"));

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn backups_are_listed_restored_and_pruned() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf())
        .expect("manager")
        .with_retention(2);

    let mut cfg = Config::default();
    cfg.currency = "GBP".into();
    let first = manager.backup(&cfg, Some("first")).expect("backup");
    manager.backup(&cfg, Some("second")).expect("backup");
    manager.backup(&cfg, Some("third")).expect("backup");

    let backups = manager.list_backups().expect("list");
    assert_eq!(backups.len(), 2);

    let kept = backups[0].clone();
    let restored = manager.restore(&kept).expect("restore");
    assert_eq!(restored.currency, "GBP");
    assert_eq!(manager.load().expect("load").currency, "GBP");

    if !backups.contains(&first) {
        assert!(manager.restore(&first).is_err());
    }
}
