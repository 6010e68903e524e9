use std::collections::{BTreeMap, HashMap};

use hoppr_common::host::Host;

use super::Group;
use super::resolver::canonical_key;
use super::vars;

/// Accumulates inherited group vars for resolved closures. Many hosts
/// share a closure, so results are memoized by the canonical group
/// set key.
pub(crate) struct VarMerger<'a> {
    groups: &'a BTreeMap<String, Group>,
    cache: HashMap<String, Host>,
}

impl<'a> VarMerger<'a> {
    pub(crate) fn new(groups: &'a BTreeMap<String, Group>) -> Self {
        Self {
            groups,
            cache: HashMap::new(),
        }
    }

    /// Merged semantic view of every group's vars in `closure`,
    /// visited in the closure's sorted order with fill-if-empty
    /// semantics. The host itself outranks the result either way.
    pub(crate) fn inherited(&mut self, closure: &[String]) -> Host {
        let key = canonical_key(closure);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let mut acc = Host::default();
        for name in closure {
            if let Some(group) = self.groups.get(name) {
                if group.vars.is_empty() {
                    continue;
                }
                acc.fill_from(&vars::from_pairs(&group.vars));
            }
        }

        self.cache.insert(key, acc.clone());
        acc
    }
}
