//! Configuration file support for appviewer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub colors: Colors,
}

/// Default values for command line options
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Defaults {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default = "default_output")]
    pub output: String,
}

/// Color settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Colors {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_label() -> String {
    "app".to_string()
}

fn default_output() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            label: default_label(),
            output: default_output(),
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from file or return defaults
    pub fn load() -> Self {
        match Self::find_config_file() {
            Some(path) => match Self::load_from_file(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    crate::log_warn!("Ignoring config file: {:#}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .appviewer.toml in current directory
    /// 2. ~/.config/appviewer/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".appviewer.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("appviewer").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }
}

impl Defaults {
    /// Command line values win; anything left unset comes from the file
    pub fn merged(
        &self,
        namespace: Option<String>,
        label: Option<String>,
        output: Option<String>,
    ) -> Defaults {
        Defaults {
            namespace: namespace.unwrap_or_else(|| self.namespace.clone()),
            label: label.unwrap_or_else(|| self.label.clone()),
            output: output.unwrap_or_else(|| self.output.clone()),
        }
    }
}

impl Colors {
    /// Turn terminal colors off process-wide when disabled
    pub fn apply(&self) {
        if !self.enabled {
            colored::control::set_override(false);
        }
    }
}
