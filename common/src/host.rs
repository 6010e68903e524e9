//! # Inventory Host Model
//!
//! The shared host record and its overlay merge. An empty string or a
//! zero port means "unset"; unset fields are filled in from group vars
//! and caller defaults during inventory finalization.

/// A single inventory host with its connection attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    /// Inventory name, the unique lookup key. Never empty once parsed.
    pub name: String,
    /// Connect address. Callers substitute `name` when unset.
    pub address: String,
    /// Connect port, 0 = unset.
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Privilege-escalation secret for the remote session.
    pub become_password: String,
    /// Identity files, ordered. Multiple sources may each contribute.
    pub private_keys: Vec<String>,
    /// Groups the host was declared under at parse time.
    pub direct_groups: Vec<String>,
    /// Full group closure, sorted and de-duplicated after resolution.
    pub groups: Vec<String>,
}

impl Host {
    /// Fills every still-unset field from `other`. Set fields always
    /// win, so applying the same overlay again is a no-op. Private
    /// keys accumulate instead: keys from `other` not already present
    /// are appended after this host's own.
    pub fn fill_from(&mut self, other: &Host) {
        if self.name.is_empty() {
            self.name = other.name.clone();
        }
        if self.address.is_empty() {
            self.address = other.address.clone();
        }
        if self.port == 0 {
            self.port = other.port;
        }
        if self.user.is_empty() {
            self.user = other.user.clone();
        }
        if self.password.is_empty() {
            self.password = other.password.clone();
        }
        if self.become_password.is_empty() {
            self.become_password = other.become_password.clone();
        }
        for key in &other.private_keys {
            if !self.private_keys.contains(key) {
                self.private_keys.push(key.clone());
            }
        }
    }
}
