//! Value unification for roles with known-canonical spellings.

use std::collections::BTreeMap;

/// Canonicalizes raw values for specific roles (journal titles,
/// publisher-like names). Returns the input unchanged when no unification
/// applies.
pub trait ValueUnifier {
    fn unify(&self, role: &str, raw: &str) -> String;
}

/// Unifier that never changes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUnifier;

impl ValueUnifier for IdentityUnifier {
    fn unify(&self, _role: &str, raw: &str) -> String {
        raw.to_string()
    }
}

/// Unifier backed by per-role raw→canonical mappings.
#[derive(Debug, Clone, Default)]
pub struct MapUnifier {
    mappings: BTreeMap<String, BTreeMap<String, String>>,
}

impl MapUnifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        role: impl Into<String>,
        raw: impl Into<String>,
        canonical: impl Into<String>,
    ) {
        self.mappings
            .entry(role.into())
            .or_default()
            .insert(raw.into(), canonical.into());
    }

    /// Installs a whole raw→canonical table for one role.
    pub fn set_role_map(&mut self, role: impl Into<String>, map: BTreeMap<String, String>) {
        self.mappings.insert(role.into(), map);
    }
}

impl ValueUnifier for MapUnifier {
    fn unify(&self, role: &str, raw: &str) -> String {
        self.mappings
            .get(role)
            .and_then(|map| map.get(raw))
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_unifier_only_touches_known_values() {
        let mut unifier = MapUnifier::new();
        unifier.add("publisher", "Springer Nature", "Springer");
        assert_eq!(unifier.unify("publisher", "Springer Nature"), "Springer");
        assert_eq!(unifier.unify("publisher", "Elsevier"), "Elsevier");
        assert_eq!(unifier.unify("journal_full_title", "Springer Nature"), "Springer Nature");
    }
}
