use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::host::Host;

/// Settings file name, looked up in the platform config directory.
pub const SETTINGS_FILE: &str = "hoppr.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot find the {SETTINGS_FILE} config file")]
    NotFound,
    #[error("cannot read the {SETTINGS_FILE} config file: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("cannot parse the {SETTINGS_FILE} config file: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

/// The tool's own settings. Everything is optional in the file; the
/// inventory engine only consumes `path` and `defaults`, the rest is
/// wiring for the ssh launch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Primary inventory path, tried before anything found in
    /// ansible.cfg.
    pub path: String,
    /// Strict mode: refuse to run ssh when the host is not in the
    /// inventory instead of passing arguments through.
    pub inventory_only: bool,
    /// Command template. The first whitespace-separated word is the
    /// program, the rest become leading arguments.
    pub ssh_command: String,
    pub debug: bool,
    /// Environment variables injected into the child process.
    pub environ: BTreeMap<String, String>,
    pub defaults: SettingsDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: String::new(),
            inventory_only: false,
            ssh_command: "ssh".to_string(),
            debug: false,
            environ: BTreeMap::new(),
            defaults: SettingsDefaults::default(),
        }
    }
}

/// Lowest-precedence connection attributes, applied to every host
/// after group-var inheritance.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsDefaults {
    pub port: u16,
    pub user: String,
    #[serde(rename = "ssh_password")]
    pub password: String,
    pub become_password: String,
    pub private_keys: Vec<String>,
}

impl SettingsDefaults {
    /// Bridges the configured defaults into the merge engine's host
    /// shape.
    pub fn to_host(&self) -> Host {
        Host {
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            become_password: self.become_password.clone(),
            private_keys: self.private_keys.clone(),
            ..Host::default()
        }
    }
}

impl Settings {
    /// Reads the settings from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = locate().ok_or(ConfigError::NotFound)?;
        Self::read(&path)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

fn locate() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join(SETTINGS_FILE);
    path.exists().then_some(path)
}
