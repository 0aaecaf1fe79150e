//! Include expansion across loaded lists.

use ahash::{AHashMap, AHashSet};

use crate::entry::{Entry, RawList};
use crate::{Error, Result};

/// All loaded lists, keyed by upper-cased name.
#[derive(Debug, Default)]
pub struct Registry {
    lists: AHashMap<String, RawList>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a list under its own name, returning the list it replaced.
    pub fn insert(&mut self, list: RawList) -> Option<RawList> {
        self.lists.insert(list.name.clone(), list)
    }

    /// Look up a list by its upper-cased name.
    pub fn get(&self, name: &str) -> Option<&RawList> {
        self.lists.get(name)
    }

    /// Number of lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether no list has been loaded.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Iterate over lists in unspecified order.
    pub fn lists(&self) -> impl Iterator<Item = &RawList> {
        self.lists.values()
    }
}

impl FromIterator<RawList> for Registry {
    fn from_iter<I: IntoIterator<Item = RawList>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for list in iter {
            registry.insert(list);
        }
        registry
    }
}

/// A list with every include directive expanded.
#[derive(Debug, Clone)]
pub struct ResolvedList {
    pub name: String,
    /// Upper-cased names of every list absorbed while resolving
    pub inclusion: AHashSet<String>,
    /// Entries with no include directive left
    pub entries: Vec<Entry>,
}

/// Expand the include directives of `list` against `registry`.
///
/// Expansion runs in passes: each pass replaces every include directive with
/// the referenced list's entries at the same position, and the next pass
/// handles includes brought in by the previous one. A name is absorbed at
/// most once per root, which also breaks cycles; the root itself is not
/// pre-seeded, so a self-include expands once.
pub fn resolve(list: &RawList, registry: &Registry) -> Result<ResolvedList> {
    let mut inclusion = AHashSet::new();
    let mut current = list.entries.clone();

    loop {
        let mut next = Vec::with_capacity(current.len());
        let mut progressed = false;

        for entry in current {
            if !entry.is_include() {
                next.push(entry);
                continue;
            }

            let name = entry.value.to_uppercase();
            if inclusion.contains(&name) {
                continue;
            }

            let referenced = registry
                .get(&name)
                .ok_or_else(|| Error::IncludeNotFound(entry.value.clone()))?;
            inclusion.insert(name);
            next.extend(referenced.entries.iter().cloned());
            progressed = true;
        }

        current = next;
        if !progressed {
            break;
        }
    }

    Ok(ResolvedList {
        name: list.name.clone(),
        inclusion,
        entries: current,
    })
}
