//! Greedy formulation composer.
//!
//! Two phases: seed a small canonical starting selection, then repeat
//! full passes over the candidate pool, committing any candidate whose
//! trial strictly improves the mean pairwise compatibility while the
//! trial recipe validates cleanly. A pass that commits nothing ends the
//! search. Strict improvement guarantees termination: the pool is
//! finite and every committed pass raises the score.

use tracing::{debug, info};

use crate::compat::{CompatModel, CompatScorer};
use crate::profile::{CarbonatedProfile, ProfileDeriver};
use blendx_core::{
    resolve_preferred, EmbeddingStore, ExactResolver, IngredientCatalog, Labels, Process,
    ProcessStep, Recipe, RecipeIngredient, ResolutionStrategy, Result, SubstringResolver,
};
use blendx_rules::{validate, RuleSet, Violation};

/// Canonical seed groups: one resolution attempt per group, aliases in
/// preference order.
const SEED_GROUPS: &[&[&str]] = &[
    &["water", "carbonated_water", "bottled_water", "distilled_water"],
    &["citric_acid"],
    &["lemon", "lime"],
];

/// Base candidate pool for a carbonated beverage.
const POOL_NAMES: &[&str] = &[
    "water",
    "sugar",
    "citric_acid",
    "lemon",
    "lime",
    "black_salt",
    "cumin",
    "ginger",
    "stevia",
];

const RECIPE_ID: &str = "GEN-CSD-001";
const RECIPE_NAME: &str = "Generated Carbonated Beverage";
const PROCESS_TEMPLATE: &str = "standard_csd";

const PROCESS_STEPS: &[&str] = &[
    "prepare_syrup_mix",
    "filter",
    "in_line_blend_to_target_brix_and_acid",
    "chill_to_cold_fill_temperature",
    "carbonation_to_target_volumes",
    "fill_and_seal",
    "date_code_and_pack",
];

/// The finished output of one composition run.
#[derive(Debug, Clone)]
pub struct Composition {
    pub recipe: Recipe,
    /// Mean pairwise compatibility of the final selection.
    pub score: f32,
    /// Selected node ids in acceptance order.
    pub selection: Vec<String>,
    /// Result of the final re-validation. Empty on the normal path;
    /// non-empty only when even the seed-only recipe is invalid.
    pub violations: Vec<Violation>,
}

pub struct Composer<'a, M: CompatModel> {
    catalog: &'a IngredientCatalog,
    store: &'a EmbeddingStore,
    rules: &'a RuleSet,
    scorer: CompatScorer<M>,
    deriver: Box<dyn ProfileDeriver>,
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl<'a, M: CompatModel> Composer<'a, M> {
    pub fn new(
        catalog: &'a IngredientCatalog,
        store: &'a EmbeddingStore,
        rules: &'a RuleSet,
        model: M,
    ) -> Self {
        Self {
            catalog,
            store,
            rules,
            scorer: CompatScorer::new(model),
            deriver: Box::new(CarbonatedProfile),
            strategies: vec![Box::new(ExactResolver), Box::new(SubstringResolver)],
        }
    }

    /// Swap in a different quantity deriver.
    #[must_use]
    pub fn with_deriver(mut self, deriver: Box<dyn ProfileDeriver>) -> Self {
        self.deriver = deriver;
        self
    }

    /// Swap in a different resolution chain (tried in order).
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    fn strategy_refs(&self) -> Vec<&dyn ResolutionStrategy> {
        self.strategies.iter().map(|s| s.as_ref()).collect()
    }

    /// Resolve the canonical seed groups. Groups that resolve to nothing,
    /// or to ids without embeddings, are dropped; seeding never fails.
    fn seed(&self) -> Vec<String> {
        let strategies = self.strategy_refs();
        let mut seed = Vec::new();
        for group in SEED_GROUPS {
            match resolve_preferred(self.catalog, &strategies, group) {
                Some(hit) if self.store.contains(&hit.node_id) => {
                    if !seed.contains(&hit.node_id) {
                        debug!(name = %hit.name, node_id = %hit.node_id, "seed resolved");
                        seed.push(hit.node_id);
                    }
                }
                Some(hit) => {
                    debug!(name = %hit.name, "seed has no embedding, dropped");
                }
                None => {
                    debug!(group = ?group, "seed group unresolved, dropped");
                }
            }
        }
        seed
    }

    /// Candidate pool: base names resolved exactly, restricted to
    /// ingredient nodes with embeddings.
    fn candidate_pool(&self) -> Vec<String> {
        let mut pool = Vec::new();
        for name in POOL_NAMES {
            let Some(node_id) = self.catalog.id_of(name) else {
                continue;
            };
            let is_ingredient = self
                .catalog
                .kind_of(node_id)
                .map(|k| k.is_ingredient())
                .unwrap_or(false);
            if is_ingredient && self.store.contains(node_id) && !pool.iter().any(|p| p == node_id)
            {
                pool.push(node_id.to_string());
            }
        }
        pool
    }

    /// Materialize a selection into a full recipe: derive targets and
    /// amounts from the display names, then resolve each non-zero amount
    /// back to a catalog entry. Unresolvable amounts are omitted.
    fn build_recipe(&self, selection: &[String]) -> Result<Recipe> {
        let mut names = Vec::with_capacity(selection.len());
        for node_id in selection {
            names.push(self.catalog.name_of(node_id)?.to_string());
        }
        let derived = self.deriver.derive(&names);

        let strategies = self.strategy_refs();
        let mut ingredients = Vec::new();
        for amount in &derived.amounts {
            if amount.quantity <= 0.0 {
                continue;
            }
            let Some(hit) = resolve_preferred(self.catalog, &strategies, &[amount.name.as_str()])
            else {
                debug!(name = %amount.name, "amount unresolvable, omitted");
                continue;
            };
            ingredients.push(RecipeIngredient {
                name: hit.name,
                node_id: hit.node_id,
                quantity: amount.quantity,
                unit: amount.unit.to_string(),
                class: amount.class.to_string(),
            });
        }

        Ok(Recipe {
            id: RECIPE_ID.to_string(),
            name: RECIPE_NAME.to_string(),
            country: "IN".to_string(),
            subcategory: "carbonated".to_string(),
            dietary_mode: "liquid".to_string(),
            veg_flag: true,
            jain_flag: true,
            targets: derived.targets,
            nutrition: None,
            ingredients,
            process: Process {
                template: PROCESS_TEMPLATE.to_string(),
                steps: PROCESS_STEPS.iter().map(|s| ProcessStep::named(*s)).collect(),
            },
            labels: Labels {
                veg_symbol: true,
                claims: Vec::new(),
                warnings: Vec::new(),
            },
        })
    }

    /// Run the full composition: seed, expand greedily, re-validate.
    pub fn compose(&self) -> Result<Composition> {
        let mut selection = self.seed();
        let pool = self.candidate_pool();
        let mut best_score = self.scorer.set_score(&selection, self.store)?;
        info!(
            seed = selection.len(),
            pool = pool.len(),
            score = best_score,
            "starting greedy expansion"
        );

        let mut passes = 0_u32;
        let mut improved = true;
        while improved {
            improved = false;
            passes += 1;
            for candidate in &pool {
                if selection.contains(candidate) {
                    continue;
                }
                let mut trial = selection.clone();
                trial.push(candidate.clone());
                let score = self.scorer.set_score(&trial, self.store)?;
                if score <= best_score {
                    continue;
                }
                let recipe = self.build_recipe(&trial)?;
                let violations = validate(&recipe, self.rules);
                if violations.is_empty() {
                    debug!(candidate = %candidate, score, "candidate accepted");
                    selection = trial;
                    best_score = score;
                    improved = true;
                } else {
                    debug!(
                        candidate = %candidate,
                        violations = violations.len(),
                        "candidate improves score but violates constraints"
                    );
                }
            }
        }

        let recipe = self.build_recipe(&selection)?;
        let violations = validate(&recipe, self.rules);
        info!(
            selected = selection.len(),
            score = best_score,
            passes,
            violations = violations.len(),
            "composition finished"
        );
        Ok(Composition {
            recipe,
            score: best_score,
            selection,
            violations,
        })
    }
}
