//! Constraint validator.
//!
//! `validate` is a pure function over a formulation and a rule set. It
//! never mutates either argument and never fails on well-formed input:
//! missing optional fields are "not applicable", not errors. Rule
//! families are evaluated in a fixed order so the violation sequence is
//! stable across runs.

use serde::{Deserialize, Serialize};

use crate::ruleset::RuleSet;
use blendx_core::Recipe;

/// One failed check: the rule identifier plus a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub detail: String,
}

impl Violation {
    fn new(rule: &str, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            detail: detail.into(),
        }
    }
}

/// Evaluate a formulation against the rule set. An empty result means
/// the formulation is valid.
pub fn validate(recipe: &Recipe, rules: &RuleSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_dietary_mode(recipe, rules, &mut violations);
    check_prohibited(recipe, rules, &mut violations);
    check_caffeine(recipe, rules, &mut violations);
    check_targets(recipe, rules, &mut violations);
    check_nutrient_caps(recipe, rules, &mut violations);
    check_labelling(recipe, &mut violations);

    violations
}

fn check_dietary_mode(recipe: &Recipe, rules: &RuleSet, out: &mut Vec<Violation>) {
    let required = &rules.dietary.dietary_mode;
    if &recipe.dietary_mode != required {
        out.push(Violation::new(
            "dietary_mode",
            format!("Dietary mode must be {required}"),
        ));
    }
}

/// One violation per offending ingredient, deliberately not deduplicated.
fn check_prohibited(recipe: &Recipe, rules: &RuleSet, out: &mut Vec<Violation>) {
    let prohibited: Vec<String> = rules.prohibited_lowercase().collect();
    for ing in &recipe.ingredients {
        let name = ing.name.trim().to_lowercase();
        if prohibited.iter().any(|p| p == &name) {
            out.push(Violation::new(
                "prohibited_ingredients",
                format!("{name} is prohibited"),
            ));
        }
    }
}

/// Fail-safe guard: a caffeinated ingredient with no configured maximum
/// is a violation. An undefined limit is never treated as "no limit".
fn check_caffeine(recipe: &Recipe, rules: &RuleSet, out: &mut Vec<Violation>) {
    let has_caffeine = recipe
        .ingredients
        .iter()
        .any(|ing| ing.name.to_lowercase().contains("caffeine"));
    if has_caffeine && rules.caffeine_max().is_none() {
        out.push(Violation::new(
            "caffeine_limits",
            "Caffeine limits undefined; set per FSSAI before use.",
        ));
    }
}

fn check_targets(recipe: &Recipe, rules: &RuleSet, out: &mut Vec<Violation>) {
    let targets = &rules.operational_guidelines.targets;

    if let (Some(ph), Some([lo, hi])) = (recipe.targets.ph, targets.pH_range) {
        if ph < lo || ph > hi {
            out.push(Violation::new(
                "pH_range",
                format!("pH {ph} out of range [{lo}, {hi}]"),
            ));
        }
    }

    // Brix has union semantics: any one profile interval may satisfy it.
    if let Some(brix) = recipe.targets.brix_percent {
        let ok = targets
            .product_profiles
            .iter()
            .any(|p| p.brix_range_percent[0] <= brix && brix <= p.brix_range_percent[1]);
        if !ok {
            out.push(Violation::new(
                "brix_profiles",
                format!("BRIX {brix}% not within any profile ranges"),
            ));
        }
    }

    if let (Some(co2), Some([lo, hi])) = (recipe.targets.co2_volumes, targets.co2_volumes) {
        if co2 < lo || co2 > hi {
            out.push(Violation::new(
                "co2",
                format!("CO2 {co2} vols out of range [{lo}, {hi}]"),
            ));
        }
    }
}

/// Absent nutrient declarations are silently skipped.
fn check_nutrient_caps(recipe: &Recipe, rules: &RuleSet, out: &mut Vec<Violation>) {
    let targets = &rules.operational_guidelines.targets;
    let Some(nutrition) = &recipe.nutrition else {
        return;
    };
    if let (Some(sodium), Some(cap)) = (nutrition.sodium_mg, targets.sodium_mg_per_100mL_max) {
        if sodium > cap {
            out.push(Violation::new(
                "sodium_cap",
                format!("Sodium {sodium}mg/100mL exceeds {cap}"),
            ));
        }
    }
    if let (Some(potassium), Some(cap)) =
        (nutrition.potassium_mg, targets.potassium_mg_per_100mL_max)
    {
        if potassium > cap {
            out.push(Violation::new(
                "potassium_cap",
                format!("Potassium {potassium}mg/100mL exceeds {cap}"),
            ));
        }
    }
}

/// The veg symbol is required unconditionally. Conservative default:
/// ingredient classes are not cross-checked against the flag.
fn check_labelling(recipe: &Recipe, out: &mut Vec<Violation>) {
    if !recipe.labels.veg_symbol {
        out.push(Violation::new(
            "veg_symbol",
            "Veg symbol required by default for vegetarian beverages in IN.",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::{CaffeineRule, ProductProfile};
    use blendx_core::{Labels, Nutrition, Process, ProcessStep, RecipeIngredient, Targets};

    fn rules() -> RuleSet {
        let mut rules = RuleSet::default();
        rules.dietary.dietary_mode = "liquid".to_string();
        rules.hard_constraints.prohibited_ingredients = vec!["aspartame".to_string()];
        let targets = &mut rules.operational_guidelines.targets;
        targets.pH_range = Some([2.5, 4.0]);
        targets.co2_volumes = Some([1.5, 4.0]);
        targets.product_profiles = vec![
            ProductProfile {
                name: Some("regular".to_string()),
                brix_range_percent: [8.0, 10.0],
            },
            ProductProfile {
                name: Some("diet".to_string()),
                brix_range_percent: [0.5, 1.5],
            },
        ];
        targets.sodium_mg_per_100mL_max = Some(45.0);
        rules
    }

    fn recipe() -> Recipe {
        Recipe {
            id: "T-1".into(),
            name: "test soda".into(),
            country: "IN".into(),
            subcategory: "carbonated".into(),
            dietary_mode: "liquid".into(),
            veg_flag: true,
            jain_flag: true,
            targets: Targets {
                brix_percent: Some(9.0),
                ph: Some(3.2),
                ta_g_l_as_citric: Some(3.5),
                co2_volumes: Some(3.0),
            },
            nutrition: None,
            ingredients: vec![ingredient("water")],
            process: Process {
                template: "standard_csd".into(),
                steps: vec![ProcessStep::named("filter")],
            },
            labels: Labels {
                veg_symbol: true,
                ..Labels::default()
            },
        }
    }

    fn ingredient(name: &str) -> RecipeIngredient {
        RecipeIngredient {
            name: name.to_string(),
            node_id: "1".to_string(),
            quantity: 1.0,
            unit: "g".to_string(),
            class: "flavor".to_string(),
        }
    }

    #[test]
    fn test_valid_recipe_has_no_violations() {
        assert!(validate(&recipe(), &rules()).is_empty());
    }

    #[test]
    fn test_dietary_mode_mismatch() {
        let mut rec = recipe();
        rec.dietary_mode = "solid".into();
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "dietary_mode");
    }

    #[test]
    fn test_prohibited_ingredient_single_violation() {
        let mut rec = recipe();
        rec.ingredients.push(ingredient("Aspartame"));
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "prohibited_ingredients");
        assert!(v[0].detail.contains("aspartame"));
    }

    #[test]
    fn test_prohibited_not_deduplicated() {
        let mut rec = recipe();
        rec.ingredients.push(ingredient("aspartame"));
        rec.ingredients.push(ingredient("aspartame"));
        let v = validate(&rec, &rules());
        assert_eq!(
            v.iter().filter(|v| v.rule == "prohibited_ingredients").count(),
            2
        );
    }

    #[test]
    fn test_caffeine_undefined_limit_flagged() {
        let mut rec = recipe();
        rec.ingredients.push(ingredient("caffeine_extract"));
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "caffeine_limits");
        assert!(v[0].detail.contains("undefined"));
    }

    #[test]
    fn test_caffeine_with_defined_limit_passes() {
        let mut r = rules();
        r.hard_constraints.caffeine = Some(CaffeineRule { max: Some(145.0) });
        let mut rec = recipe();
        rec.ingredients.push(ingredient("caffeine_extract"));
        assert!(validate(&rec, &r).is_empty());
    }

    #[test]
    fn test_brix_union_semantics() {
        let mut rec = recipe();
        rec.targets.brix_percent = Some(9.0);
        assert!(validate(&rec, &rules()).is_empty());

        rec.targets.brix_percent = Some(1.0);
        assert!(validate(&rec, &rules()).is_empty());

        rec.targets.brix_percent = Some(5.0);
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "brix_profiles");
    }

    #[test]
    fn test_ph_out_of_range_detail() {
        let mut rec = recipe();
        rec.targets.ph = Some(5.5);
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "pH_range");
        assert!(v[0].detail.contains("5.5"));
        assert!(v[0].detail.contains("[2.5, 4]"));
    }

    #[test]
    fn test_co2_out_of_range() {
        let mut rec = recipe();
        rec.targets.co2_volumes = Some(5.0);
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "co2");
    }

    #[test]
    fn test_undeclared_targets_skipped() {
        let mut rec = recipe();
        rec.targets = Targets::default();
        assert!(validate(&rec, &rules()).is_empty());
    }

    #[test]
    fn test_sodium_cap() {
        let mut rec = recipe();
        rec.nutrition = Some(Nutrition {
            sodium_mg: Some(60.0),
            potassium_mg: None,
        });
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "sodium_cap");
    }

    #[test]
    fn test_absent_nutrition_skipped() {
        let mut rec = recipe();
        rec.nutrition = Some(Nutrition::default());
        assert!(validate(&rec, &rules()).is_empty());
    }

    #[test]
    fn test_veg_symbol_required_unconditionally() {
        let mut rec = recipe();
        rec.labels.veg_symbol = false;
        let v = validate(&rec, &rules());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule, "veg_symbol");
    }

    #[test]
    fn test_violation_order_is_stable() {
        let mut rec = recipe();
        rec.dietary_mode = "solid".into();
        rec.ingredients.push(ingredient("aspartame"));
        rec.targets.ph = Some(9.9);
        rec.labels.veg_symbol = false;
        let v = validate(&rec, &rules());
        let order: Vec<&str> = v.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(
            order,
            vec!["dietary_mode", "prohibited_ingredients", "pH_range", "veg_symbol"]
        );
    }
}
