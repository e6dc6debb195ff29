//! Identifier newtypes.
//!
//! Catalog entries (items, recipes, factory types, technologies) are
//! identified by name and are looked up through [`crate::catalog::Catalog`].
//! The one place integers identify something at runtime is a live factory
//! *instance*, tracked by [`crate::factory_id_map::FactoryIdMap`].

/// Identifies a live factory instance. Caller-supplied or auto-allocated;
/// see [`crate::factory_id_map::FactoryIdMap`] for the allocation contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct FactoryId(pub u64);

impl std::fmt::Display for FactoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_and_copy() {
        let a = FactoryId(3);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(FactoryId(1) < FactoryId(2));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(FactoryId(42).to_string(), "42");
    }

    #[test]
    fn hashable_in_set() {
        let mut set = std::collections::HashSet::new();
        set.insert(FactoryId(1));
        set.insert(FactoryId(1));
        assert_eq!(set.len(), 1);
    }
}
