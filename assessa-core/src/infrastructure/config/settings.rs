// assessa-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::criteria::Language;
use crate::infrastructure::error::InfrastructureError;

pub const SETTINGS_FILES: [&str; 2] = ["assessa.yaml", "assessa.yml"];

pub const ENV_STORE_ROOT: &str = "ASSESSA_STORE_ROOT";
pub const ENV_GATEWAY_TIMEOUT_MS: &str = "ASSESSA_GATEWAY_TIMEOUT_MS";
pub const ENV_LOCALE: &str = "ASSESSA_LOCALE";

#[derive(Debug, Deserialize, Serialize, Clone, Default, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreSettings,

    #[serde(default)]
    #[validate(nested)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub locale: Language,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct StoreSettings {
    /// Document store directory. Relative paths resolve against the project directory.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct GatewaySettings {
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1, max = 600_000, message = "timeout_ms must be within 1..=600000"))]
    pub timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Settings {
    pub fn store_root(&self, project_dir: &Path) -> PathBuf {
        if self.store.root.is_absolute() {
            self.store.root.clone()
        } else {
            project_dir.join(&self.store.root)
        }
    }
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".assessa")
}

fn default_timeout_ms() -> u64 {
    10_000
}

// --- LOADER ---

/// Loads `assessa.yaml` from `project_dir`, then applies environment overrides.
///
/// A missing file means defaults. A malformed one is an error.
#[instrument]
pub fn load_settings(project_dir: &Path) -> Result<Settings, InfrastructureError> {
    let mut settings = match find_settings_file(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading settings");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}

fn find_settings_file(root: &Path) -> Option<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Layers environment values over the file settings. `lookup` abstracts `std::env::var`.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_STORE_ROOT) {
        info!(old = ?settings.store.root, new = ?val, "Overriding store root via ENV");
        settings.store.root = PathBuf::from(val);
    }
    if let Some(val) = lookup(ENV_GATEWAY_TIMEOUT_MS) {
        settings.gateway.timeout_ms = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "{} must be a number of milliseconds, got '{}'",
                ENV_GATEWAY_TIMEOUT_MS, val
            ))
        })?;
    }
    if let Some(val) = lookup(ENV_LOCALE) {
        settings.locale = val.parse().map_err(InfrastructureError::ConfigError)?;
    }
    Ok(())
}
