use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use widget_mover_core::{WorldScale, WORLD_DPI_RATIO};
use widget_mover_ui3d::{ConsoleBounds, PlacementPolicy, PolicyKind};

pub const DEFAULT_CONFIG_PATH: &str = "config/mover.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MoverConfig {
    /// `constrained` (console layout) or `free_form`.
    pub policy: PolicyKind,
    /// World meters per placement unit.
    pub world_dpi_ratio: f32,
    pub bounds: ConsoleBounds,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Constrained,
            world_dpi_ratio: WORLD_DPI_RATIO,
            bounds: ConsoleBounds::default(),
        }
    }
}

impl MoverConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                return MoverConfig::default();
            }
        };

        let cfg = match toml::from_str::<MoverConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                return MoverConfig::default();
            }
        };

        if let Err(err) = cfg.validate() {
            warn!("Invalid mover config {}: {err:#}. Using defaults", path.display());
            return MoverConfig::default();
        }
        cfg
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Check the ratio and bounds are usable.
    pub fn validate(&self) -> Result<()> {
        WorldScale::new(self.world_dpi_ratio)?;
        self.bounds.validate()?;
        Ok(())
    }

    pub fn scale(&self) -> Result<WorldScale> {
        Ok(WorldScale::new(self.world_dpi_ratio)?)
    }

    pub fn placement_policy(&self) -> PlacementPolicy {
        self.policy.into_policy(self.bounds)
    }
}
