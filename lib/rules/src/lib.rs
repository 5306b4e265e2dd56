//! # BlendX Rules
//!
//! Declarative constraint rule set and the validator that evaluates a
//! candidate formulation against it.
//!
//! The rule document has four families: dietary requirements, hard
//! constraints (prohibited ingredients, nutrient caps), operational
//! target ranges, and labeling requirements. [`RuleSet::load`] maps the
//! JSON document onto typed structs and rejects malformed documents
//! upfront; [`validate`] then evaluates a [`blendx_core::Recipe`] and
//! returns the ordered list of [`Violation`]s (empty means valid).
//!
//! ## Example
//!
//! ```rust
//! use blendx_rules::{validate, RuleSet};
//!
//! let rules: RuleSet = serde_json::from_str(
//!     r#"{"dietary": {"dietary_mode": "liquid"}}"#,
//! ).unwrap();
//! rules.validate_document().unwrap();
//! ```

pub mod ruleset;
pub mod validate;

pub use ruleset::{
    CaffeineRule, DietaryRules, HardConstraints, LabellingRules, OperationalGuidelines,
    ProductProfile, Range, RuleSet, RulesError, TargetRules,
};
pub use validate::{validate, Violation};
