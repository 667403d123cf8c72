use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{LedgerError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LedgerConfig {
    pub registry: RegistryConfig,
    pub locks: LockConfig,
}

/// Account number range and how hard to look for a free number
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegistryConfig {
    pub id_min: u32,
    pub id_max: u32,
    pub max_id_attempts: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            id_min: 100_000,
            id_max: 999_999,
            max_id_attempts: 1_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LockConfig {
    pub timeout_ms: u64,
}

impl LockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self { timeout_ms: 500 }
    }
}

impl LedgerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("reading {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| LedgerError::Config(format!("parsing {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise (or on any error) use the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file not found at '{}'. Using defaults.", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Config loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.registry.id_min > self.registry.id_max {
            return Err(LedgerError::Config(format!(
                "id_min ({}) is greater than id_max ({})",
                self.registry.id_min, self.registry.id_max
            )));
        }
        if self.registry.max_id_attempts == 0 {
            return Err(LedgerError::Config(
                "max_id_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();

        assert_eq!(config.registry.id_min, 100_000);
        assert_eq!(config.registry.id_max, 999_999);
        assert_eq!(config.locks.timeout(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: LedgerConfig = toml::from_str(
            r#"
            [registry]
            id_min = 1000
            id_max = 9999

            [locks]
            timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.registry.id_min, 1000);
        assert_eq!(config.registry.id_max, 9999);
        assert_eq!(config.registry.max_id_attempts, 1_000);
        assert_eq!(config.locks.timeout_ms, 250);
    }

    #[test]
    fn test_validate() {
        let mut config = LedgerConfig::default();
        config.registry.max_id_attempts = 0;
        assert!(matches!(config.validate(), Err(LedgerError::Config(_))));

        let mut config = LedgerConfig::default();
        config.registry.id_min = 5;
        config.registry.id_max = 4;
        assert!(matches!(config.validate(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("pin_ledger_missing_config.toml");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(LedgerConfig::load(&path), Err(LedgerError::Config(_))));
        assert_eq!(LedgerConfig::load_or_default(&path).registry.id_min, 100_000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pin_ledger_config_{}.toml", std::process::id()));
        std::fs::write(&path, "[locks]\ntimeout_ms = 50\n").unwrap();

        let config = LedgerConfig::load(&path).unwrap();
        assert_eq!(config.locks.timeout(), Duration::from_millis(50));

        std::fs::write(&path, "[registry]\nid_min = 9\nid_max = 1\n").unwrap();
        assert!(LedgerConfig::load(&path).is_err());
        assert_eq!(LedgerConfig::load_or_default(&path).registry.id_min, 100_000);

        let _ = std::fs::remove_file(&path);
    }
}
