//! Sidecar `ansible.cfg` parser: plain INI sections with none of the
//! inventory semantics. Only `[defaults]` is consumed downstream, but
//! every section is kept so callers can probe for what they need.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hoppr_common::host::Host;

use crate::inventory::line::{self, LineKind};

/// Section for keys appearing before any `[section]` header.
const DEFAULT_SECTION: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsibleCfg {
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl AnsibleCfg {
    /// Reads and parses `path`. Callers treat a missing or unreadable
    /// file as "no sidecar config", not a failure.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut cfg = Self::default();
        let mut current = DEFAULT_SECTION.to_string();

        for raw in text.lines() {
            match line::classify(raw) {
                LineKind::Group(name) => current = name,
                LineKind::Var { key, value } => {
                    cfg.section_mut(&current).insert(key, value);
                }
                // values with spaces ("ssh_args = -o ...") classify
                // as host lines; recover them with a raw split
                LineKind::Host { .. } | LineKind::Bare(_) => {
                    if let Some((key, value)) = raw.trim().split_once('=') {
                        cfg.section_mut(&current)
                            .insert(key.trim().to_string(), value.trim().to_string());
                    }
                }
                _ => {}
            }
        }

        cfg
    }

    fn section_mut(&mut self, section: &str) -> &mut BTreeMap<String, String> {
        self.sections.entry(section.to_string()).or_default()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Inventory paths from `[defaults] inventory`, comma separated.
    pub fn inventory_paths(&self) -> Vec<String> {
        self.get("defaults", "inventory")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Overrides connection defaults with the `[defaults]` keys the
    /// upstream tooling understands.
    pub fn apply_defaults(&self, defaults: &mut Host) {
        if let Some(user) = self.get("defaults", "remote_user") {
            if !user.is_empty() {
                defaults.user = user.to_string();
            }
        }
        if let Some(key) = self.get("defaults", "private_key_file") {
            if !key.is_empty() {
                defaults.private_keys = vec![key.to_string()];
            }
        }
        if let Some(port) = self.get("defaults", "remote_port") {
            if let Ok(port) = port.parse::<u16>() {
                defaults.port = port;
            }
        }
    }
}
