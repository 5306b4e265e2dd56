//! Pluggable ingredient-name resolution.
//!
//! The composer resolves human-given names ("water", "lemon") to catalog
//! node ids through a chain of strategies. Every preferred name is tried
//! through one strategy before the chain falls through to the next, so an
//! exact match on any alias beats a substring match on the first.

use crate::catalog::IngredientCatalog;

/// A resolved name: the catalog id plus the display name it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub node_id: String,
    pub name: String,
}

pub trait ResolutionStrategy {
    fn resolve(&self, catalog: &IngredientCatalog, query: &str) -> Option<Resolved>;
}

/// Case-insensitive exact match against the catalog name index.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactResolver;

impl ResolutionStrategy for ExactResolver {
    fn resolve(&self, catalog: &IngredientCatalog, query: &str) -> Option<Resolved> {
        let node_id = catalog.id_of(query)?.to_string();
        let name = catalog.name_of(&node_id).ok()?.to_string();
        Some(Resolved { node_id, name })
    }
}

/// Linear substring scan over display names. First hit in catalog
/// order wins; fine at current catalog sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringResolver;

impl ResolutionStrategy for SubstringResolver {
    fn resolve(&self, catalog: &IngredientCatalog, query: &str) -> Option<Resolved> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        catalog
            .iter()
            .find(|ing| ing.name.trim().to_lowercase().contains(&needle))
            .map(|ing| Resolved {
                node_id: ing.node_id.clone(),
                name: ing.name.clone(),
            })
    }
}

/// Resolve the first preferred name any strategy can satisfy, trying all
/// names under each strategy before moving to the next strategy.
pub fn resolve_preferred(
    catalog: &IngredientCatalog,
    strategies: &[&dyn ResolutionStrategy],
    preferred: &[&str],
) -> Option<Resolved> {
    for strategy in strategies {
        for name in preferred {
            if let Some(hit) = strategy.resolve(catalog, name) {
                return Some(hit);
            }
        }
    }
    None
}

/// The default chain: exact match first, then substring fallback.
pub fn default_strategies() -> [&'static dyn ResolutionStrategy; 2] {
    [&ExactResolver, &SubstringResolver]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ingredient, NodeKind};

    fn catalog() -> IngredientCatalog {
        IngredientCatalog::from_records(vec![
            Ingredient {
                node_id: "1".into(),
                name: "carbonated_water".into(),
                kind: NodeKind::Ingredient,
                is_hub: false,
            },
            Ingredient {
                node_id: "2".into(),
                name: "lemon".into(),
                kind: NodeKind::Ingredient,
                is_hub: false,
            },
            Ingredient {
                node_id: "3".into(),
                name: "lemongrass".into(),
                kind: NodeKind::Ingredient,
                is_hub: false,
            },
        ])
    }

    #[test]
    fn test_exact_beats_substring() {
        let catalog = catalog();
        let strategies = default_strategies();
        let hit = resolve_preferred(&catalog, &strategies, &["lemon"]).unwrap();
        assert_eq!(hit.node_id, "2");
    }

    #[test]
    fn test_substring_fallback() {
        let catalog = catalog();
        let strategies = default_strategies();
        // no exact "water" entry; falls back to contains
        let hit = resolve_preferred(&catalog, &strategies, &["water"]).unwrap();
        assert_eq!(hit.node_id, "1");
        assert_eq!(hit.name, "carbonated_water");
    }

    #[test]
    fn test_alias_order_within_strategy() {
        let catalog = catalog();
        let strategies = default_strategies();
        // "soda" misses exactly and as substring, "lemon" matches exactly:
        // exact pass over all aliases runs before any substring attempt.
        let hit = resolve_preferred(&catalog, &strategies, &["soda", "lemon"]).unwrap();
        assert_eq!(hit.node_id, "2");
    }

    #[test]
    fn test_unresolvable_is_none() {
        let catalog = catalog();
        let strategies = default_strategies();
        assert!(resolve_preferred(&catalog, &strategies, &["juniper"]).is_none());
    }
}
