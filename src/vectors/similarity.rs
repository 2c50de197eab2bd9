// Similarity between two context vectors.
//
// Both measures compare association rates co-term by co-term. A co-term
// missing from one side counts as rate 0 there.
//
// Weighted Jaccard:  sum(min(a, b)) / sum(max(a, b))
// Cosine:            sum(a * b) / (|a| * |b|)
//
// Both give 0.0 when either side is empty or all-zero.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::context::ContextVector;
use crate::graph::term::TermId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    #[default]
    Cosine,
    WeightedJaccard,
}

impl SimilarityMeasure {
    pub fn compute(&self, a: &ContextVector, b: &ContextVector) -> f64 {
        match self {
            SimilarityMeasure::Cosine => cosine(a, b),
            SimilarityMeasure::WeightedJaccard => weighted_jaccard(a, b),
        }
    }
}

pub fn weighted_jaccard(a: &ContextVector, b: &ContextVector) -> f64 {
    let all_keys: HashSet<TermId> = a.terms().chain(b.terms()).collect();
    if all_keys.is_empty() {
        return 0.0;
    }

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;
    for key in all_keys {
        let ra = a.assoc_rate(key);
        let rb = b.assoc_rate(key);
        min_sum += ra.min(rb);
        max_sum += ra.max(rb);
    }

    if max_sum == 0.0 {
        0.0
    } else {
        min_sum / max_sum
    }
}

pub fn cosine(a: &ContextVector, b: &ContextVector) -> f64 {
    // Only shared co-terms contribute to the dot product
    let dot: f64 = a
        .terms()
        .map(|key| a.assoc_rate(key) * b.assoc_rate(key))
        .sum();
    let norm_a: f64 = a.terms().map(|k| a.assoc_rate(k).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.terms().map(|k| b.assoc_rate(k).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
