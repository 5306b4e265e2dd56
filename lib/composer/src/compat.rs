//! Pairwise ingredient-compatibility scoring.
//!
//! The scorer wraps an externally trained probabilistic classifier. For
//! a pair of embedding vectors, both are normalized to unit length and
//! the element-wise absolute difference is fed to the classifier; the
//! positive-class probability is the compatibility score. The feature is
//! symmetric, so `pair_score(a, b) == pair_score(b, a)`.

use serde::Deserialize;
use std::path::Path;

use blendx_core::{EmbeddingStore, Error, Result, Vector};

/// An externally supplied probabilistic binary classifier.
pub trait CompatModel {
    /// Positive-class probability for a feature vector, in [0, 1].
    fn positive_probability(&self, features: &[f32]) -> f32;
}

/// Logistic-regression classifier loaded from exported coefficients
/// (`{"weights": [...], "intercept": x}`).
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    weights: Vec<f32>,
    intercept: f32,
}

impl LogisticModel {
    pub fn new(weights: Vec<f32>, intercept: f32) -> Self {
        Self { weights, intercept }
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        let model: LogisticModel =
            serde_json::from_reader(reader).map_err(|e| Error::Serialization(e.to_string()))?;
        if model.weights.is_empty() {
            return Err(Error::InvalidConfig(
                "compatibility model has no weights".to_string(),
            ));
        }
        Ok(model)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }
}

impl CompatModel for LogisticModel {
    fn positive_probability(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.weights.len());
        let z: f32 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

/// Computes pair and set compatibility scores over an embedding store.
#[derive(Debug, Clone)]
pub struct CompatScorer<M: CompatModel> {
    model: M,
}

impl<M: CompatModel> CompatScorer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Compatibility of two embedding vectors, in [0, 1].
    pub fn pair_score(&self, a: &Vector, b: &Vector) -> f32 {
        let feature = a.normalized().abs_diff(&b.normalized());
        self.model
            .positive_probability(feature.as_slice())
            .clamp(0.0, 1.0)
    }

    /// Mean pairwise compatibility over all unordered pairs among `ids`.
    /// Fewer than two ids means no pairs to average: 0.0, not an error.
    /// An id absent from the store propagates as `EmbeddingNotFound`.
    pub fn set_score(&self, ids: &[String], store: &EmbeddingStore) -> Result<f32> {
        if ids.len() < 2 {
            return Ok(0.0);
        }
        let mut sum = 0.0_f32;
        let mut pairs = 0_u32;
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let a = store.vector_of(&ids[i])?;
                let b = store.vector_of(&ids[j])?;
                sum += self.pair_score(a, b);
                pairs += 1;
            }
        }
        Ok(sum / pairs as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store() -> EmbeddingStore {
        let mut map = HashMap::new();
        map.insert("w".to_string(), vec![1.0, 0.0]);
        map.insert("a".to_string(), vec![0.99, 0.01]);
        map.insert("s".to_string(), vec![0.0, 1.0]);
        EmbeddingStore::from_map(map)
    }

    fn scorer() -> CompatScorer<LogisticModel> {
        // negative weights on the difference feature: closer vectors
        // score higher
        CompatScorer::new(LogisticModel::new(vec![-4.0, -4.0], 2.0))
    }

    #[test]
    fn test_logistic_probability() {
        let model = LogisticModel::new(vec![0.0, 0.0], 0.0);
        assert!((model.positive_probability(&[1.0, 1.0]) - 0.5).abs() < 1e-6);

        let model = LogisticModel::new(vec![1.0], 0.0);
        assert!(model.positive_probability(&[10.0]) > 0.999);
        assert!(model.positive_probability(&[-10.0]) < 0.001);
    }

    #[test]
    fn test_pair_score_symmetric() {
        let scorer = scorer();
        let store = store();
        let w = store.vector_of("w").unwrap();
        let s = store.vector_of("s").unwrap();
        assert_eq!(scorer.pair_score(w, s), scorer.pair_score(s, w));
    }

    #[test]
    fn test_closer_vectors_score_higher() {
        let scorer = scorer();
        let store = store();
        let w = store.vector_of("w").unwrap();
        let a = store.vector_of("a").unwrap();
        let s = store.vector_of("s").unwrap();
        assert!(scorer.pair_score(w, a) > scorer.pair_score(w, s));
    }

    #[test]
    fn test_set_score_small_sets_are_zero() {
        let scorer = scorer();
        let store = store();
        assert_eq!(scorer.set_score(&[], &store).unwrap(), 0.0);
        assert_eq!(scorer.set_score(&["w".to_string()], &store).unwrap(), 0.0);
    }

    #[test]
    fn test_set_score_is_mean_of_pairs() {
        let scorer = scorer();
        let store = store();
        let ids: Vec<String> = ["w", "a", "s"].iter().map(|s| s.to_string()).collect();
        let w = store.vector_of("w").unwrap();
        let a = store.vector_of("a").unwrap();
        let s = store.vector_of("s").unwrap();
        let expected = (scorer.pair_score(w, a) + scorer.pair_score(w, s)
            + scorer.pair_score(a, s))
            / 3.0;
        let got = scorer.set_score(&ids, &store).unwrap();
        assert!((got - expected).abs() < 1e-6);
    }

    #[test]
    fn test_set_score_missing_id_propagates() {
        let scorer = scorer();
        let store = store();
        let ids: Vec<String> = ["w", "missing"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            scorer.set_score(&ids, &store),
            Err(Error::EmbeddingNotFound(_))
        ));
    }

    #[test]
    fn test_degenerate_vector_scores_finite() {
        let scorer = scorer();
        let zero = Vector::new(vec![0.0, 0.0]);
        let unit = Vector::new(vec![1.0, 0.0]);
        let score = scorer.pair_score(&zero, &unit);
        assert!(score.is_finite());
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_load_json_rejects_empty_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(file, r#"{{"weights": [], "intercept": 0.0}}"#).unwrap();
        assert!(matches!(
            LogisticModel::load_json(file.path()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
