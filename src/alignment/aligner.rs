// Bilingual aligner: rank target terms as translations of a source term.
//
// The source term's context vector is translated into the target vocabulary
// and compared with the context vector of every target term. Candidates are
// ranked by similarity, highest first.

use serde::Serialize;
use tracing::info;

use super::dictionary::BilingualDictionary;
use super::strategy::TranslationStrategy;
use super::translate::translate_vector;
use crate::error::TermError;
use crate::graph::index::TermIndex;
use crate::graph::term::TermId;
use crate::vectors::context::ContextVector;
use crate::vectors::similarity::SimilarityMeasure;

/// A target term proposed as translation, with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentCandidate {
    pub term: TermId,
    pub grouping_key: String,
    pub similarity: f64,
}

pub struct BilingualAligner<'a> {
    source: &'a TermIndex,
    target: &'a TermIndex,
    dictionary: &'a dyn BilingualDictionary,
    pub strategy: TranslationStrategy,
    pub similarity: SimilarityMeasure,
}

impl<'a> BilingualAligner<'a> {
    pub fn new(source: &'a TermIndex, target: &'a TermIndex, dictionary: &'a dyn BilingualDictionary) -> Self {
        Self {
            source,
            target,
            dictionary,
            strategy: TranslationStrategy::default(),
            similarity: SimilarityMeasure::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: TranslationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_similarity(mut self, similarity: SimilarityMeasure) -> Self {
        self.similarity = similarity;
        self
    }

    /// The source term's context vector, translated into the target
    /// vocabulary.
    pub fn translate(&self, source_term: TermId) -> Result<ContextVector, TermError> {
        let term = self.source.term(source_term)?;
        let vector = term
            .context_vector
            .as_ref()
            .ok_or_else(|| TermError::MissingContextVector(term.grouping_key.clone()))?;
        translate_vector(vector, self.source, self.dictionary, self.strategy, self.target)
    }

    /// The `top_n` target terms most similar to the translated vector. Target
    /// terms without a context vector and candidates with zero similarity are
    /// left out.
    pub fn align(&self, source_term: TermId, top_n: usize) -> Result<Vec<AlignmentCandidate>, TermError> {
        let translated = self.translate(source_term)?;

        let mut candidates: Vec<AlignmentCandidate> = self
            .target
            .iter()
            .filter_map(|t| {
                let vector = t.context_vector.as_ref()?;
                let similarity = self.similarity.compute(&translated, vector);
                (similarity > 0.0).then(|| AlignmentCandidate {
                    term: t.id,
                    grouping_key: t.grouping_key.clone(),
                    similarity,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.grouping_key.cmp(&b.grouping_key))
        });
        candidates.truncate(top_n);

        info!(
            term = %self.source.term(source_term)?.grouping_key,
            strategy = %self.strategy,
            translated_entries = translated.len(),
            candidates = candidates.len(),
            "Aligned source term"
        );
        Ok(candidates)
    }
}
