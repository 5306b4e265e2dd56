//! Ingredient catalog loaded from the node table.
//!
//! The catalog is built once at startup and passed by reference to every
//! component; there are no mutation operations after construction.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Node category from the source graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A real ingredient that can appear in a formulation
    Ingredient,
    /// Any other node type (flavor compounds, categories, ...)
    Other(String),
}

impl NodeKind {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("ingredient") {
            NodeKind::Ingredient
        } else {
            NodeKind::Other(raw.to_string())
        }
    }

    #[inline]
    pub fn is_ingredient(&self) -> bool {
        matches!(self, NodeKind::Ingredient)
    }
}

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub node_id: String,
    pub name: String,
    pub kind: NodeKind,
    /// High-degree/generic node in the originating graph. Informational
    /// only; not consulted by scoring.
    pub is_hub: bool,
}

/// Raw row shape of the node CSV (`node_id,name,id,node_type,is_hub`).
#[derive(Debug, Deserialize)]
struct NodeRow {
    node_id: String,
    name: String,
    #[allow(dead_code)]
    id: Option<String>,
    node_type: String,
    #[serde(default)]
    is_hub: Option<String>,
}

/// Immutable identifier/name indexes over the ingredient table.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    by_id: AHashMap<String, Ingredient>,
    /// Lowercased display name -> node id. Last occurrence wins,
    /// matching the source table's loading convention.
    by_name: AHashMap<String, String>,
    order: Vec<String>,
}

impl IngredientCatalog {
    /// Build a catalog from in-memory records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut catalog = Self::default();
        for ing in records {
            catalog.insert(ing);
        }
        catalog
    }

    /// Load the catalog from a CSV node table with header
    /// `node_id,name,id,node_type,is_hub`.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())
            .map_err(|e| Error::Catalog(e.to_string()))?;
        let mut catalog = Self::default();
        for row in reader.deserialize() {
            let row: NodeRow = row.map_err(|e| Error::Catalog(e.to_string()))?;
            let is_hub = row
                .is_hub
                .as_deref()
                .map(|v| {
                    let v = v.trim();
                    v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("hub")
                })
                .unwrap_or(false);
            catalog.insert(Ingredient {
                node_id: row.node_id,
                name: row.name,
                kind: NodeKind::parse(&row.node_type),
                is_hub,
            });
        }
        Ok(catalog)
    }

    fn insert(&mut self, ing: Ingredient) {
        let key = ing.name.trim().to_lowercase();
        self.by_name.insert(key, ing.node_id.clone());
        if !self.by_id.contains_key(&ing.node_id) {
            self.order.push(ing.node_id.clone());
        }
        self.by_id.insert(ing.node_id.clone(), ing);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    #[inline]
    pub fn contains(&self, node_id: &str) -> bool {
        self.by_id.contains_key(node_id)
    }

    pub fn get(&self, node_id: &str) -> Option<&Ingredient> {
        self.by_id.get(node_id)
    }

    /// Display name for an id, failing with `IngredientNotFound`.
    pub fn name_of(&self, node_id: &str) -> Result<&str> {
        self.by_id
            .get(node_id)
            .map(|i| i.name.as_str())
            .ok_or_else(|| Error::IngredientNotFound(node_id.to_string()))
    }

    pub fn kind_of(&self, node_id: &str) -> Option<&NodeKind> {
        self.by_id.get(node_id).map(|i| &i.kind)
    }

    /// Exact case-insensitive name lookup.
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Iterate entries in stable insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}
