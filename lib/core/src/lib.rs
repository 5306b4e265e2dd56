//! # BlendX Core
//!
//! Core data model for the BlendX formulation composer.
//!
//! This crate provides the read-only collaborators the search layers are
//! built on:
//!
//! - [`Vector`] - Dense vector with the normalization and difference ops
//!   the compatibility features need
//! - [`IngredientCatalog`] - Immutable id/name indexes over the node table
//! - [`EmbeddingStore`] - id -> vector mapping loaded once at startup
//! - [`ResolutionStrategy`] - Pluggable name resolution (exact, substring)
//! - [`Recipe`] - The serialized formulation record
//!
//! ## Example
//!
//! ```rust
//! use blendx_core::{EmbeddingStore, Vector};
//! use std::collections::HashMap;
//!
//! let mut map = HashMap::new();
//! map.insert("1".to_string(), vec![1.0, 0.0]);
//! let store = EmbeddingStore::from_map(map);
//!
//! assert!(store.contains("1"));
//! let v: &Vector = store.vector_of("1").unwrap();
//! assert_eq!(v.dim(), 2);
//! ```

pub mod catalog;
pub mod embedding;
pub mod error;
pub mod recipe;
pub mod resolve;
pub mod vector;

pub use catalog::{Ingredient, IngredientCatalog, NodeKind};
pub use embedding::EmbeddingStore;
pub use error::{Error, Result};
pub use recipe::{Labels, Nutrition, Process, ProcessStep, Recipe, RecipeIngredient, Targets};
pub use resolve::{
    default_strategies, resolve_preferred, ExactResolver, Resolved, ResolutionStrategy,
    SubstringResolver,
};
pub use vector::Vector;
