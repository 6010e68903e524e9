use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::Group;

/// Computes transitive group membership over the declared children
/// relation. Children may be declared in any order, reference groups
/// that are never otherwise defined, and form cycles; expansion runs
/// to a fixed point instead of recursing, so a cycle simply converges
/// with every member in every other member's closure.
pub struct GroupResolver<'a> {
    groups: &'a BTreeMap<String, Group>,
    cache: HashMap<String, Vec<String>>,
}

impl<'a> GroupResolver<'a> {
    pub fn new(groups: &'a BTreeMap<String, Group>) -> Self {
        Self {
            groups,
            cache: HashMap::new(),
        }
    }

    /// Every group reachable from `groups`: the input set itself, the
    /// children its members declare, and transitively every group
    /// declaring a member of the growing set as a child. Returned
    /// sorted and de-duplicated; memoized per canonical input set.
    pub fn resolve(&mut self, groups: &[String]) -> Vec<String> {
        let key = canonical_key(groups);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let mut all: BTreeSet<String> = groups.iter().cloned().collect();
        loop {
            let before = all.len();
            for (name, group) in self.groups {
                if all.contains(name) {
                    all.extend(group.children.iter().cloned());
                } else if group.children.iter().any(|child| all.contains(child)) {
                    all.insert(name.clone());
                }
            }
            if all.len() == before {
                break;
            }
        }

        let resolved: Vec<String> = all.into_iter().collect();
        self.cache.insert(key, resolved.clone());
        resolved
    }
}

/// Canonical cache key for a group set: sorted, de-duplicated, comma
/// joined.
pub(crate) fn canonical_key(groups: &[String]) -> String {
    let set: BTreeSet<&str> = groups.iter().map(String::as_str).collect();
    set.into_iter().collect::<Vec<_>>().join(",")
}
