use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND: &str = "STOCKBOOK_BIND";
pub const ENV_DATA_DIR: &str = "STOCKBOOK_DATA_DIR";
pub const ENV_CONFIG_DIR: &str = "STOCKBOOK_CONFIG_DIR";

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "bind_address",
    "data_root",
    "log_filter",
    "currency",
    "locale",
    "ui_color_enabled",
];

/// Server and shell settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_bind_address")]
    pub bind_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the table files. Defaults to `~/Documents/Stockbook`.
    pub data_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tracing directive used when `RUST_LOG` is unset, e.g. `stockbook=debug`.
    pub log_filter: Option<String>,

    pub currency: String,
    pub locale: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            data_root: None,
            log_filter: None,
            currency: "USD".into(),
            locale: "en-US".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_bind_address() -> String {
        DEFAULT_BIND_ADDRESS.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Stockbook")
    }

    /// Applies `PORT`, `STOCKBOOK_BIND` and `STOCKBOOK_DATA_DIR` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`. `PORT` replaces only the port of the bind
    /// address; `STOCKBOOK_BIND` replaces the whole address and wins over `PORT`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = present(ENV_PORT) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_PORT, &port))?;
            let host = self
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".into());
            self.bind_address = format!("{host}:{port}");
        }
        if let Some(bind) = present(ENV_BIND) {
            self.bind_address = bind.trim().to_string();
        }
        if let Some(dir) = present(ENV_DATA_DIR) {
            self.data_root = Some(PathBuf::from(dir.trim()));
        }
        Ok(())
    }

    /// Updates one setting by key. Empty values clear optional settings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "bind_address" => {
                if value.is_empty() {
                    return Err(ConfigError::invalid(key, value));
                }
                self.bind_address = value.to_string();
            }
            "data_root" => {
                self.data_root = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "log_filter" => {
                self.log_filter = (!value.is_empty()).then(|| value.to_string());
            }
            "currency" => {
                if value.is_empty() {
                    return Err(ConfigError::invalid(key, value));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "locale" => {
                if value.is_empty() {
                    return Err(ConfigError::invalid(key, value));
                }
                self.locale = value.to_string();
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(ConfigError::invalid(key, value)),
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Current value of a setting as display text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "bind_address" => self.bind_address.clone(),
            "data_root" => self.resolve_data_root().display().to_string(),
            "log_filter" => self.log_filter.clone().unwrap_or_default(),
            "currency" => self.currency.clone(),
            "locale" => self.locale.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn port_replaces_only_the_port() {
        let mut cfg = Config::default();
        cfg.apply_overrides(env(&[(ENV_PORT, "8080")])).unwrap();
        assert_eq!(cfg.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn bind_wins_over_port() {
        let mut cfg = Config::default();
        cfg.apply_overrides(env(&[(ENV_PORT, "8080"), (ENV_BIND, "0.0.0.0:9000")]))
            .unwrap();
        assert_eq!(cfg.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply_overrides(env(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn data_dir_override_sets_root() {
        let mut cfg = Config::default();
        cfg.apply_overrides(env(&[(ENV_DATA_DIR, "/srv/stock")])).unwrap();
        assert_eq!(cfg.resolve_data_root(), PathBuf::from("/srv/stock"));
    }

    #[test]
    fn set_and_get_by_key() {
        let mut cfg = Config::default();
        cfg.set("currency", "eur").unwrap();
        cfg.set("ui_color_enabled", "off").unwrap();
        cfg.set("log_filter", "stockbook=debug").unwrap();
        assert_eq!(cfg.get("currency").unwrap(), "EUR");
        assert_eq!(cfg.get("ui_color_enabled").unwrap(), "false");
        assert_eq!(cfg.log_filter.as_deref(), Some("stockbook=debug"));
        cfg.set("log_filter", "").unwrap();
        assert!(cfg.log_filter.is_none());
        assert!(matches!(
            cfg.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
    }
}
