//! Serialized formulation record.
//!
//! This is the system's sole persisted artifact. Field names and nesting
//! mirror the downstream validators' expected JSON shape exactly
//! (`node_id`, `pH`, `ta_g_L_as_citric`, ...), so renames here are
//! breaking changes.

use serde::{Deserialize, Serialize};

/// Target profile values. All optional; an absent target is "not
/// declared", which validators treat as not applicable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brix_percent: Option<f64>,
    #[serde(rename = "pH", skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(rename = "ta_g_L_as_citric", skip_serializing_if = "Option::is_none")]
    pub ta_g_l_as_citric: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2_volumes: Option<f64>,
}

/// Declared nutrition content per 100 mL serving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium_mg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub node_id: String,
    pub quantity: f64,
    pub unit: String,
    /// Functional class: water, acid, sweetener, flavor
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: String,
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl ProcessStep {
    pub fn named(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            params: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub template: String,
    pub steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default)]
    pub veg_symbol: bool,
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A candidate or finished formulation.
///
/// Mutable only while the composer is building it; treated as immutable
/// once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub country: String,
    pub subcategory: String,
    pub dietary_mode: String,
    pub veg_flag: bool,
    pub jain_flag: bool,
    pub targets: Targets,
    #[serde(rename = "nutrition_per_100mL", skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    pub ingredients: Vec<RecipeIngredient>,
    pub process: Process,
    pub labels: Labels,
}
