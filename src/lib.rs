//! # BlendX
//!
//! Constraint-guided greedy beverage formulation over learned
//! ingredient-compatibility scores.
//!
//! BlendX builds a candidate beverage recipe by greedily selecting
//! ingredients that maximize a learned pairwise-compatibility score,
//! rejecting any candidate whose trial recipe violates a declarative
//! regulatory rule set.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blendx::prelude::*;
//!
//! let catalog = IngredientCatalog::from_csv_path("input/nodes.csv").unwrap();
//! let emb_path = EmbeddingStore::find_latest("output").unwrap();
//! let store = EmbeddingStore::load_json(emb_path).unwrap();
//! let rules = RuleSet::load("config/constraints.json").unwrap();
//! let model = LogisticModel::load_json("models/compat.json").unwrap();
//!
//! let composition = Composer::new(&catalog, &store, &rules, model)
//!     .compose()
//!     .unwrap();
//! assert!(composition.violations.is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! - [`blendx_core`] - Vectors, ingredient catalog, embedding store,
//!   name resolution, and the recipe record
//! - [`blendx_rules`] - Typed constraint rule set and the validator
//! - [`blendx_composer`] - Compatibility scoring and the greedy search

// Re-export core types
pub use blendx_core::{
    EmbeddingStore, Error, Ingredient, IngredientCatalog, NodeKind, Recipe, RecipeIngredient,
    Result, Targets, Vector,
};

// Re-export rules
pub use blendx_rules::{validate, RuleSet, RulesError, Violation};

// Re-export composer
pub use blendx_composer::{CompatModel, CompatScorer, Composer, Composition, LogisticModel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        validate, CompatModel, CompatScorer, Composer, Composition, EmbeddingStore, Error,
        Ingredient, IngredientCatalog, LogisticModel, NodeKind, Recipe, RecipeIngredient, Result,
        RuleSet, RulesError, Targets, Vector, Violation,
    };
}
