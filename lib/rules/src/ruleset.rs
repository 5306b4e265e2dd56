//! Constraint rule-set document.
//!
//! The JSON rule document is mapped to explicit structs per rule family
//! and checked once at load time, so a malformed document surfaces as a
//! single upfront [`RulesError`] instead of a missing-key failure halfway
//! through validation. Loaded once per run, read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("IO error reading rule set: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed rule set: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid rule set: {0}")]
    Invalid(String),
}

/// A closed interval `[lo, hi]`.
pub type Range = [f64; 2];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietaryRules {
    #[serde(default)]
    pub dietary_mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaffeineRule {
    /// Maximum in mg per serving. `None` means the limit is undefined,
    /// which the validator treats as fail-safe, never as "no limit".
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardConstraints {
    #[serde(default)]
    pub prohibited_ingredients: Vec<String>,
    #[serde(default)]
    pub caffeine: Option<CaffeineRule>,
}

/// A named product profile, each with its own brix interval. A brix
/// target is acceptable if it falls inside any one profile's interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub brix_range_percent: Range,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct TargetRules {
    #[serde(default)]
    pub pH_range: Option<Range>,
    #[serde(default)]
    pub product_profiles: Vec<ProductProfile>,
    #[serde(default)]
    pub co2_volumes: Option<Range>,
    #[serde(default)]
    pub sodium_mg_per_100mL_max: Option<f64>,
    #[serde(default)]
    pub potassium_mg_per_100mL_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationalGuidelines {
    #[serde(default)]
    pub targets: TargetRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabellingRules {
    #[serde(default)]
    pub mandatory: Vec<String>,
}

/// The full declarative rule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub dietary: DietaryRules,
    #[serde(default)]
    pub hard_constraints: HardConstraints,
    #[serde(default)]
    pub operational_guidelines: OperationalGuidelines,
    #[serde(default)]
    pub labelling: LabellingRules,
}

impl RuleSet {
    /// Load and validate a rule document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        let rules: RuleSet = serde_json::from_reader(reader)?;
        rules.validate_document()?;
        Ok(rules)
    }

    /// Structural checks applied once at load time.
    pub fn validate_document(&self) -> Result<(), RulesError> {
        if self.dietary.dietary_mode.trim().is_empty() {
            return Err(RulesError::Invalid(
                "dietary.dietary_mode is required".to_string(),
            ));
        }
        let targets = &self.operational_guidelines.targets;
        check_range("targets.pH_range", targets.pH_range)?;
        check_range("targets.co2_volumes", targets.co2_volumes)?;
        for (i, profile) in targets.product_profiles.iter().enumerate() {
            check_range(
                &format!("targets.product_profiles[{i}].brix_range_percent"),
                Some(profile.brix_range_percent),
            )?;
        }
        Ok(())
    }

    /// Lowercased prohibited-ingredient names.
    pub fn prohibited_lowercase(&self) -> impl Iterator<Item = String> + '_ {
        self.hard_constraints
            .prohibited_ingredients
            .iter()
            .map(|n| n.trim().to_lowercase())
    }

    /// The configured caffeine maximum, if any.
    pub fn caffeine_max(&self) -> Option<f64> {
        self.hard_constraints.caffeine.as_ref().and_then(|c| c.max)
    }
}

fn check_range(field: &str, range: Option<Range>) -> Result<(), RulesError> {
    if let Some([lo, hi]) = range {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(RulesError::Invalid(format!(
                "{field}: [{lo}, {hi}] is not a valid closed interval"
            )));
        }
    }
    Ok(())
}
