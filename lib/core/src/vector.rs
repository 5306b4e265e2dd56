use serde::{Deserialize, Serialize};

/// Additive epsilon used when normalizing, so a near-zero vector
/// divides by a small positive norm instead of failing.
const NORM_EPSILON: f32 = 1e-12;

/// A dense vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean (L2) norm
    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalize the vector to unit length in place.
    /// Near-zero vectors are scaled by `1 / (norm + epsilon)` rather
    /// than left untouched, so downstream features stay finite.
    #[inline]
    pub fn normalize(&mut self) {
        let inv_norm = 1.0 / (self.norm() + NORM_EPSILON);
        for x in &mut self.data {
            *x *= inv_norm;
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Element-wise absolute difference, `|a[i] - b[i]|`.
    /// Symmetric in its arguments; used as the pairwise feature vector.
    #[inline]
    #[must_use]
    pub fn abs_diff(&self, other: &Vector) -> Vector {
        debug_assert_eq!(self.dim(), other.dim());
        Vector::new(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (a - b).abs())
                .collect(),
        )
    }
}
