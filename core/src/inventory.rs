//! # Inventory Engine
//!
//! Parses the static-file group/host/vars inventory dialect, merges
//! any number of sources, resolves transitive group membership and
//! answers host lookups.
//!
//! Control flow: file bytes → [`parser`] (driving [`line`] and
//! [`vars`]) → raw model → [`resolver`] per host → var/defaults merge
//! → finalized [`Host`] records.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use hoppr_common::host::Host;

pub(crate) mod line;
mod merge;
mod parser;
pub mod resolver;
mod vars;

use merge::VarMerger;
use resolver::GroupResolver;

/// Reserved group for hosts declared before any section header.
pub const DEFAULT_GROUP: &str = "ungrouped";

/// A named group's raw content: vars as written in a `:vars` section
/// and child references as written in a `:children` section.
///
/// Groups are created on first reference, so a name that only ever
/// appears as a child or header is still a valid, possibly empty,
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub vars: BTreeMap<String, String>,
    pub children: Vec<String>,
}

/// All hosts and groups parsed from one or more inventory sources.
/// Built once per invocation and not mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub hosts: BTreeMap<String, Host>,
    pub groups: BTreeMap<String, Group>,
    /// Source files that contributed, in merge order.
    pub paths: Vec<PathBuf>,
}

impl Inventory {
    pub fn new() -> Self {
        let mut inventory = Self::default();
        inventory.ensure_group(DEFAULT_GROUP);
        inventory
    }

    /// Parses a single source into the raw, un-finalized model.
    pub fn parse(text: &str) -> Self {
        parser::parse(text)
    }

    /// Loads every readable path in order, merges them (later sources
    /// override earlier ones per record) and finalizes every host.
    /// Unreadable sources are skipped; if none of them yields a host
    /// the result is simply an empty inventory, not an error.
    pub fn load<P: AsRef<Path>>(paths: &[P], defaults: &Host) -> Self {
        let mut inventory = Self::new();
        for path in paths {
            let path = path.as_ref();
            match fs::read_to_string(path) {
                Ok(text) => {
                    debug!("parsing inventory {}", path.display());
                    inventory.absorb(Self::parse(&text));
                    inventory.paths.push(path.to_path_buf());
                }
                Err(err) => debug!("skipping inventory {}: {err}", path.display()),
            }
        }
        inventory.finalize(defaults);
        inventory
    }

    /// "No inventory available" signal for the caller.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Record-granularity merge: `other`'s hosts and groups replace
    /// same-named entries wholesale.
    pub fn absorb(&mut self, other: Inventory) {
        for (name, group) in other.groups {
            self.groups.insert(name, group);
        }
        for (name, host) in other.hosts {
            self.hosts.insert(name, host);
        }
    }

    /// Resolves every host's group closure, then fills unset fields
    /// from inherited group vars and finally from `defaults`. Host
    /// declared attributes always win; running this again is a no-op.
    pub fn finalize(&mut self, defaults: &Host) {
        let mut resolver = GroupResolver::new(&self.groups);
        let mut merger = VarMerger::new(&self.groups);
        for host in self.hosts.values_mut() {
            host.groups = resolver.resolve(&host.direct_groups);
            let inherited = merger.inherited(&host.groups);
            host.fill_from(&inherited);
            host.fill_from(defaults);
        }
    }

    pub fn match_exact(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// Lazily yields hosts whose name matches the shell-glob pattern
    /// (`*`, `?`, `[...]`). An invalid pattern matches nothing.
    pub fn match_glob<'a>(&'a self, pattern: &str) -> impl Iterator<Item = &'a Host> + 'a {
        let pattern = glob::Pattern::new(pattern).ok();
        self.hosts
            .values()
            .filter(move |host| pattern.as_ref().is_some_and(|p| p.matches(&host.name)))
    }

    pub(crate) fn ensure_group(&mut self, name: &str) {
        if !self.groups.contains_key(name) {
            self.groups.insert(name.to_string(), Group::default());
        }
    }
}
