//! Process-wide switching policy
//!
//! Stored in `~/.config/altmap/config.yaml`. Missing keys fall back to their
//! defaults, so an empty file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::variant::VariantSlot;

/// Policy flags and naming for the variant registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AltmapConfig {
    /// Allow `define_alternate` to overwrite an existing alternate
    pub allow_redefine_alternate: bool,
    /// Create an empty active map when switching a map that does not exist
    pub define_mapvar_when_switching: bool,
    /// Define an empty alternate when switching to a missing alternate
    pub define_altvar_when_switching: bool,
    /// Take a backup when switching to a missing backup
    pub define_bkpvar_when_switching: bool,
    /// Prefix naming a map's alternate variable (`alt-foo-map`)
    pub alt_name_prefix: String,
    /// Prefix naming a map's backup variable (`backup-foo-map`)
    pub backup_name_prefix: String,
    /// Extension of definition files picked up by the directory loader
    pub definition_extension: String,
}

impl Default for AltmapConfig {
    fn default() -> Self {
        Self {
            allow_redefine_alternate: true,
            define_mapvar_when_switching: false,
            define_altvar_when_switching: false,
            define_bkpvar_when_switching: false,
            alt_name_prefix: "alt-".to_string(),
            backup_name_prefix: "backup-".to_string(),
            definition_extension: "yaml".to_string(),
        }
    }
}

impl AltmapConfig {
    /// Config with every auto-repair flag enabled
    pub fn permissive() -> Self {
        Self {
            define_mapvar_when_switching: true,
            define_altvar_when_switching: true,
            define_bkpvar_when_switching: true,
            ..Self::default()
        }
    }

    /// Variable name holding `slot` of map `name`
    pub fn variable_name(&self, name: &str, slot: VariantSlot) -> String {
        match slot {
            VariantSlot::Active => name.to_string(),
            VariantSlot::Alternate => format!("{}{}", self.alt_name_prefix, name),
            VariantSlot::Backup => format!("{}{}", self.backup_name_prefix, name),
        }
    }

    /// Whether switching may create `slot` when it is missing
    pub fn defines_when_switching(&self, slot: VariantSlot) -> bool {
        match slot {
            VariantSlot::Active => self.define_mapvar_when_switching,
            VariantSlot::Alternate => self.define_altvar_when_switching,
            VariantSlot::Backup => self.define_bkpvar_when_switching,
        }
    }

    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Save config to the user config directory
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
