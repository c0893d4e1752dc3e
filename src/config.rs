//! Application configuration.

use crate::api_provider::ApiProvider;
use crate::consts::cli_consts::{APP_DIR, CONFIG_FILE};
use crate::error::ConfigError;
use crate::layout::{FrameId, LayoutMode};
use crate::registry::ModuleType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::Path, path::PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Layout the dashboard opens with.
    pub layout: LayoutMode,
    /// API shown in the console's selector at startup.
    pub api: ApiProvider,
    /// Whether to paint the dark dashboard background.
    pub with_background_color: bool,
    /// Initial module per frame, by type identifier.
    pub frames: BTreeMap<FrameId, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutMode::default(),
            api: ApiProvider::default(),
            with_background_color: false,
            frames: default_assignments()
                .into_iter()
                .map(|(frame, module_type)| (frame, module_type.to_string()))
                .collect(),
        }
    }
}

/// The assignment every dashboard starts from.
pub fn default_assignments() -> BTreeMap<FrameId, ModuleType> {
    BTreeMap::from([
        (FrameId::Frame1, ModuleType::Chat),
        (FrameId::Frame2, ModuleType::Agenda),
        (FrameId::Frame3, ModuleType::Email),
        (FrameId::Frame4, ModuleType::RoutePlanner),
    ])
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns a `ConfigError` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the configured module for every frame.
    ///
    /// Frames that are missing or name an unknown type keep their default
    /// assignment; each such fallback is logged.
    pub fn frame_assignments(&self) -> BTreeMap<FrameId, ModuleType> {
        let mut assignments = default_assignments();
        for (frame, name) in &self.frames {
            match ModuleType::parse(name) {
                Ok(module_type) => {
                    assignments.insert(*frame, module_type);
                }
                Err(e) => {
                    log::warn!("{} in config for {}, keeping default", e, frame);
                }
            }
        }
        assignments
    }
}

/// Location of the config file: `~/.art/config.json`.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(APP_DIR).join(CONFIG_FILE))
}
