//! # BlendX Composer
//!
//! Greedy, constraint-gated formulation search.
//!
//! - [`CompatScorer`] - Learned pairwise compatibility over embedding
//!   vectors; `set_score` (mean pairwise score) is the objective
//! - [`ProfileDeriver`] / [`CarbonatedProfile`] - Quantity and target
//!   derivation for a selected ingredient set
//! - [`Composer`] - Seeds a selection, then repeatedly sweeps the
//!   candidate pool, committing candidates that strictly improve the
//!   objective while passing constraint validation
//!
//! ## Example
//!
//! ```rust,no_run
//! use blendx_composer::{Composer, LogisticModel};
//! use blendx_core::{EmbeddingStore, IngredientCatalog};
//! use blendx_rules::RuleSet;
//!
//! let catalog = IngredientCatalog::from_csv_path("input/nodes.csv").unwrap();
//! let store = EmbeddingStore::load_json("output/flavorgraph-embedding_latest.json").unwrap();
//! let rules = RuleSet::load("config/constraints.json").unwrap();
//! let model = LogisticModel::load_json("models/compat.json").unwrap();
//!
//! let composition = Composer::new(&catalog, &store, &rules, model)
//!     .compose()
//!     .unwrap();
//! println!("{}", serde_json::to_string_pretty(&composition.recipe).unwrap());
//! ```

pub mod compat;
pub mod composer;
pub mod profile;

pub use compat::{CompatModel, CompatScorer, LogisticModel};
pub use composer::{Composer, Composition};
pub use profile::{Amount, CarbonatedProfile, DerivedProfile, ProfileDeriver};
