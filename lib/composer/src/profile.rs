//! Quantity and target derivation for a selected ingredient set.
//!
//! The composer treats quantity assignment as a collaborator: given the
//! display names of the selected ingredients, a deriver produces the
//! target profile and per-ingredient amounts. [`CarbonatedProfile`] is
//! the stock heuristic for a 1 L carbonated batch.

use blendx_core::Targets;

/// One derived amount, keyed by canonical ingredient name.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    pub name: String,
    pub quantity: f64,
    pub unit: &'static str,
    pub class: &'static str,
}

/// Derived targets plus amounts for the whole selection. Zero-quantity
/// amounts are expected and skipped at recipe materialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedProfile {
    pub targets: Targets,
    pub amounts: Vec<Amount>,
}

pub trait ProfileDeriver {
    fn derive(&self, names: &[String]) -> DerivedProfile;
}

/// Stock heuristics for a 1 L carbonated batch: sugar drives the brix
/// target, citrus flavor volume is taken out of the water volume, and
/// trace spices get fixed doses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarbonatedProfile;

const BATCH_ML: f64 = 1000.0;
const FLAVOR_ML: f64 = 6.0;

impl ProfileDeriver for CarbonatedProfile {
    fn derive(&self, names: &[String]) -> DerivedProfile {
        let has = |wanted: &str| names.iter().any(|n| n.trim().eq_ignore_ascii_case(wanted));

        let has_sugar = has("sugar");
        let has_stevia = has("stevia");
        let brix = if has_sugar { 10.0 } else { 1.0 };
        let sugar_g = if has_sugar { brix * 10.0 } else { 0.0 };
        let acid_g = if has("citric_acid") { 1.8 } else { 0.0 };
        let has_citrus = has("lemon") || has("lime");
        let flavor_ml = if has_citrus { FLAVOR_ML } else { 0.0 };
        // flavor volume attaches to whichever citrus is present
        let lemon_ml = if has("lemon") { flavor_ml } else { 0.0 };
        let lime_ml = if !has("lemon") && has("lime") { flavor_ml } else { 0.0 };
        let water_ml = BATCH_ML - flavor_ml;

        let amount = |name: &str, quantity: f64, unit: &'static str, class: &'static str| Amount {
            name: name.to_string(),
            quantity,
            unit,
            class,
        };

        DerivedProfile {
            targets: Targets {
                brix_percent: Some(brix),
                ph: Some(3.2),
                ta_g_l_as_citric: Some(3.5),
                co2_volumes: Some(3.0),
            },
            amounts: vec![
                amount("water", water_ml, "mL", "water"),
                amount("sugar", sugar_g, "g", "sweetener"),
                amount("citric_acid", acid_g, "g", "acid"),
                amount("lemon", lemon_ml, "mL", "flavor"),
                amount("lime", lime_ml, "mL", "flavor"),
                amount(
                    "black_salt",
                    if has("black_salt") { 0.3 } else { 0.0 },
                    "g",
                    "flavor",
                ),
                amount("cumin", if has("cumin") { 0.2 } else { 0.0 }, "g", "flavor"),
                amount(
                    "stevia",
                    if has_stevia { 0.08 } else { 0.0 },
                    "g",
                    "sweetener",
                ),
            ],
        }
    }
}
