use pgvector::Vector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn has_dimension(&self, expected: usize) -> bool {
        self.dimension() == expected
    }

    /// Cosine similarity in `[-1, 1]`. Mismatched or zero-length vectors score 0.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f32 {
        let a = self.as_slice();
        let b = other.as_slice();

        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl From<Vector> for EmbeddingVector {
    fn from(vector: Vector) -> Self {
        Self(vector.to_vec())
    }
}

impl From<&EmbeddingVector> for Vector {
    fn from(vector: &EmbeddingVector) -> Self {
        Vector::from(vector.0.clone())
    }
}
