//! Component registry.

use jcod_core::KeyCase;
use std::collections::HashMap;

/// Case-normalized mapping from component name to component reference.
///
/// Built once per parser and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Registry<C> {
    entries: HashMap<String, C>,
    key_case: KeyCase,
}

impl<C> Registry<C> {
    /// Builds a registry, rewriting every key through `key_case`.
    ///
    /// When two distinct names normalize to the same key, the one appearing
    /// later in `entries` wins and a warning is logged.
    pub fn new<I, K>(entries: I, key_case: KeyCase) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
    {
        let mut normalized: HashMap<String, C> = HashMap::new();
        let mut origins: HashMap<String, String> = HashMap::new();

        for (name, component) in entries {
            let name = name.into();
            let key = key_case.apply(&name).into_owned();
            if let Some(previous) = origins.insert(key.clone(), name.clone())
                && previous != name
            {
                log::warn!(
                    "Registry keys [{}] and [{}] both normalize to [{}]; [{}] is used.",
                    previous,
                    name,
                    key,
                    name
                );
            }
            normalized.insert(key, component);
        }

        Self {
            entries: normalized,
            key_case,
        }
    }

    /// Looks a component up by its declared name.
    ///
    /// The name is tried as written first, then normalized through the
    /// registry's case policy.
    pub fn get(&self, name: &str) -> Option<&C> {
        if let Some(component) = self.entries.get(name) {
            return Some(component);
        }
        if self.key_case.is_active() {
            return self.entries.get(self.key_case.apply(name).as_ref());
        }
        None
    }

    /// Returns whether `name` resolves to a registered component.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Normalized keys, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the case policy.
    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            key_case: KeyCase::Preserve,
        }
    }
}

impl<C, K: Into<String>> FromIterator<(K, C)> for Registry<C> {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Registry::new(iter, KeyCase::Preserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserve_copies_entries() {
        let registry: Registry<u32> = [("Card", 1), ("Tabs", 2)].into_iter().collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Card"), Some(&1));
        assert_eq!(registry.get("card"), None);
        assert_eq!(registry.names(), ["Card", "Tabs"]);
    }

    #[test]
    fn kebab_normalizes_keys_and_lookups() {
        let registry = Registry::new([("LinkCard", 1), ("Aside", 2)], KeyCase::Kebab);
        assert_eq!(registry.names(), ["aside", "link-card"]);
        assert_eq!(registry.get("link-card"), Some(&1));
        assert_eq!(registry.get("LinkCard"), Some(&1));
        assert_eq!(registry.get("Aside"), Some(&2));
        assert!(!registry.contains("Tabs"));
    }

    #[test]
    fn collisions_keep_the_last_entry() {
        let registry = Registry::new(
            [("LinkCard", 1), ("link_card", 2), ("link-card", 3)],
            KeyCase::Kebab,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("link-card"), Some(&3));
    }

    #[test]
    fn empty_default() {
        let registry: Registry<()> = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.key_case(), KeyCase::Preserve);
    }
}
