//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World geometry settings.
    pub world: WorldConfig,
    /// Block placement settings and data-driven materials.
    pub placement: PlacementConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World geometry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Exclusive upper bound on block Y coordinates.
    pub max_height: i32,
}

/// Placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Sound identifier played when a material does not set its own.
    pub default_place_sound: String,
    /// Volume for the default place sound.
    pub default_place_volume: f32,
    /// Pitch for the default place sound.
    pub default_place_pitch: f32,
    /// Plain materials registered without custom behavior.
    pub materials: Vec<MaterialEntry>,
}

/// A data-driven material definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialEntry {
    /// Numeric material id (0 is reserved for the empty cell).
    pub id: u16,
    /// Unique material name (e.g. "plank").
    pub name: String,
    /// Place sound identifier; falls back to the default place sound.
    #[serde(default)]
    pub place_sound: Option<String>,
    /// Fixed drop list; `None` drops the block itself.
    #[serde(default)]
    pub drops: Option<Vec<DropEntry>>,
}

/// One fixed drop stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropEntry {
    /// Dropped material id.
    pub material: u16,
    /// Variant (durability) value of the stack.
    #[serde(default)]
    pub variant: u16,
    /// Stack size.
    pub amount: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self { max_height: 256 }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            default_place_sound: "block.wood.break".to_string(),
            default_place_volume: 1.0,
            default_place_pitch: 0.75,
            materials: Vec::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

const APP_NAME: &str = "keystone";
const FILE_NAME: &str = "config.ron";

fn file_in(config_dir: &Path) -> PathBuf {
    config_dir.join(FILE_NAME)
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    let config: Config = ron::from_str(&text).map_err(ConfigError::ParseError)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Platform configuration directory for the server (`<config_dir>/keystone`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Reads `config.ron` from `config_dir`. A missing file is replaced by the
    /// defaults, which are written back so the operator has something to edit.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = file_in(config_dir);
        if !path.is_file() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }
        let config = read_file(&path)?;
        log::info!(
            "Loaded config from {} ({} configured materials)",
            path.display(),
            config.placement.materials.len()
        );
        Ok(config)
    }

    /// Writes this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let style = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, style).map_err(ConfigError::SerializeError)?;

        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        std::fs::write(file_in(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file. Returns the new config only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_file(&file_in(config_dir))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }

    /// Rejects values no world could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.max_height <= 0 {
            return Err(ConfigError::Invalid {
                field: "world.max_height",
                reason: format!("must be positive, got {}", self.world.max_height),
            });
        }
        if let Some(entry) = self.placement.materials.iter().find(|m| m.id == 0) {
            return Err(ConfigError::Invalid {
                field: "placement.materials",
                reason: format!("id 0 is reserved for the empty cell ({})", entry.name),
            });
        }
        Ok(())
    }
}
