// Scored model: terms and variants decorated with upstream scores.
//
// The scores themselves come from the scoring model of the pipeline (through
// the ScoreProvider trait); this module only holds them so the flat
// scorifier can filter and order the collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::orthography::orthographic_score;
use crate::graph::index::TermIndex;
use crate::graph::term::Term;
use crate::graph::variation::{TermVariation, VariationType};

/// Term-level scores produced upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermScores {
    pub wr_log: f64,
    pub independence_score: f64,
}

/// Variant-level scores produced upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationScores {
    pub variant_independence_score: f64,
    pub variation_score: f64,
    pub extension_affix: Option<String>,
    pub extension_gain_score: f64,
    pub extension_spec_score: f64,
}

/// Source of scores for the terms and variant edges of an index.
pub trait ScoreProvider {
    fn term_scores(&self, term: &Term) -> TermScores;

    fn variation_scores(&self, base: &Term, variant: &Term, variation: &TermVariation) -> VariationScores;

    /// Orthographic score of a term. Providers without their own measure
    /// use the character-class ratio of the lemma.
    fn orthographic_score(&self, term: &Term) -> f64 {
        orthographic_score(&term.lemma)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVariation {
    pub base_key: String,
    pub variant_key: String,
    pub kind: VariationType,
    /// Rule name or other free-form info of the edge
    #[serde(default)]
    pub info: String,
    pub variant_independence_score: f64,
    pub variation_score: f64,
    /// Affix that extended the base into this variant, if any
    #[serde(default)]
    pub extension_affix: Option<String>,
    #[serde(default)]
    pub extension_gain_score: f64,
    #[serde(default)]
    pub extension_spec_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub grouping_key: String,
    pub lemma: String,
    /// Termhood, the primary sort key of the model
    pub wr_log: f64,
    pub orthographic_score: f64,
    pub independence_score: f64,
    #[serde(default)]
    pub variations: Vec<ScoredVariation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoredModel {
    terms: Vec<ScoredTerm>,
}

impl ScoredModel {
    pub fn new(terms: Vec<ScoredTerm>) -> Self {
        Self { terms }
    }

    /// Decorate every term of the index and its direct variant edges with
    /// the scores of `provider`.
    pub fn import_term_index(index: &TermIndex, provider: &dyn ScoreProvider) -> Self {
        let mut terms = Vec::with_capacity(index.len());
        for term in index.iter() {
            let scores = provider.term_scores(term);
            let variations = index
                .variations_of(term.id)
                .iter()
                .filter_map(|edge| {
                    let variant = index.get(edge.variant)?;
                    let s = provider.variation_scores(term, variant, edge);
                    Some(ScoredVariation {
                        base_key: term.grouping_key.clone(),
                        variant_key: variant.grouping_key.clone(),
                        kind: edge.kind,
                        info: edge.info.clone(),
                        variant_independence_score: s.variant_independence_score,
                        variation_score: s.variation_score,
                        extension_affix: s.extension_affix,
                        extension_gain_score: s.extension_gain_score,
                        extension_spec_score: s.extension_spec_score,
                    })
                })
                .collect();
            terms.push(ScoredTerm {
                grouping_key: term.grouping_key.clone(),
                lemma: term.lemma.clone(),
                wr_log: scores.wr_log,
                orthographic_score: provider.orthographic_score(term),
                independence_score: scores.independence_score,
                variations,
            });
        }
        info!(terms = terms.len(), "Imported term index into scored model");
        Self { terms }
    }

    pub fn terms(&self) -> &[ScoredTerm] {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut [ScoredTerm] {
        &mut self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn variation_count(&self) -> usize {
        self.terms.iter().map(|t| t.variations.len()).sum()
    }

    pub fn get(&self, grouping_key: &str) -> Option<&ScoredTerm> {
        self.terms.iter().find(|t| t.grouping_key == grouping_key)
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ScoredTerm, &ScoredTerm) -> std::cmp::Ordering,
    {
        self.terms.sort_by(compare);
    }

    /// Remove every term whose grouping key is in `keys`.
    pub fn remove_terms(&mut self, keys: &HashSet<String>) {
        self.terms.retain(|t| !keys.contains(&t.grouping_key));
    }
}
