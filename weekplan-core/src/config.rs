//! Global weekplan configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{WeekplanError, WeekplanResult};
use crate::store::Scope;

static DEFAULT_DATA_PATH: &str = "~/.local/share/weekplan";
static DEFAULT_OWNER: &str = "local";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

/// Global configuration at ~/.config/weekplan/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// Scope identity stamped on every record this machine writes. A shared
    /// calendar is several machines configured with the same owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            data_dir: default_data_path(),
            owner: None,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> WeekplanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeekplanError::Config("Could not determine config directory".into()))?
            .join("weekplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented-out default file on first run.
    pub fn load() -> WeekplanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: GlobalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| WeekplanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WeekplanError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Save the current config to ~/.config/weekplan/config.toml
    pub fn save(&self) -> WeekplanResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| WeekplanError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| WeekplanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path)
    }

    /// The scope identity for store queries.
    pub fn scope(&self) -> Scope {
        Scope::new(self.owner.as_deref().unwrap_or(DEFAULT_OWNER))
    }

    fn create_default_config(path: &Path) -> WeekplanResult<()> {
        let contents = format!(
            "\
# weekplan configuration

# Where event records live:
# data_dir = \"{DEFAULT_DATA_PATH}\"

# Identity stamped on every record; share it across machines for a shared calendar:
# owner = \"{DEFAULT_OWNER}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeekplanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WeekplanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
