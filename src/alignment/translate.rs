// Context vector translation.
//
// Each entry of the source vector is looked up in the bilingual dictionary;
// every candidate target lemma is resolved to a term of the target
// vocabulary (the first one when a lemma matches several, candidates with no
// matching term are skipped). The entry's count and rate are then spread
// over the resolved candidates according to the strategy.
//
// Example, source term "chat" <noir: 10, chien: 3>, dictionary
// noir -> {black, dark}, chien -> {dog}, target frequencies black 35,
// dark 15, dog 7:
//
//   prorata           <black: 7, dark: 3, dog: 3>
//   most frequent     <black: 10, dog: 3>
//   equi-repartition  <black: 5, dark: 5, dog: 3>
//
// Two source entries landing on the same target term add up.

use tracing::debug;

use super::dictionary::{BilingualDictionary, TargetVocabulary};
use super::strategy::TranslationStrategy;
use crate::error::TermError;
use crate::graph::index::TermIndex;
use crate::graph::property::TermProperty;
use crate::graph::term::Term;
use crate::vectors::context::{ContextVector, Entry};

/// Translate `source` into the target vocabulary. Co-terms are resolved to
/// lemmas through `source_index`; co-terms missing from it are skipped.
pub fn translate_vector(
    source: &ContextVector,
    source_index: &TermIndex,
    dictionary: &dyn BilingualDictionary,
    strategy: TranslationStrategy,
    target: &dyn TargetVocabulary,
) -> Result<ContextVector, TermError> {
    let mut translated = ContextVector::new();

    for entry in source.sorted_entries() {
        let Some(co_term) = source_index.get(entry.co_term) else {
            continue;
        };
        let candidates = candidate_translations(co_term, dictionary, target);
        debug!(
            co_term = %co_term.lemma,
            candidates = candidates.len(),
            "Translating context vector entry"
        );

        match strategy {
            TranslationStrategy::Prorata => fill_prorata(&mut translated, &entry, &candidates)?,
            TranslationStrategy::MostFrequent => {
                fill_with_most(&mut translated, &entry, &candidates, TermProperty::Frequency)?
            }
            TranslationStrategy::MostSpecific => {
                fill_with_most(&mut translated, &entry, &candidates, TermProperty::Specificity)?
            }
            TranslationStrategy::EquiRepartition => {
                fill_equi_repartition(&mut translated, &entry, &candidates)?
            }
        }
    }

    Ok(translated)
}

/// Target terms for a source term, in dictionary order, without duplicates.
pub fn candidate_translations<'t>(
    source_term: &Term,
    dictionary: &dyn BilingualDictionary,
    target: &'t dyn TargetVocabulary,
) -> Vec<&'t Term> {
    let mut candidates: Vec<&Term> = Vec::new();
    for lemma in dictionary.translations(&source_term.lemma) {
        // The dictionary is assumed disambiguated: any matching term will do
        let Some(&term) = target.terms_by_lemma(lemma).first() else {
            continue;
        };
        if !candidates.iter().any(|c| c.id == term.id) {
            candidates.push(term);
        }
    }
    candidates
}

/// `count * freq / total_freq` per candidate, rounded down; rate copied.
/// Candidates with no frequency at all get nothing.
fn fill_prorata(target: &mut ContextVector, entry: &Entry, candidates: &[&Term]) -> Result<(), TermError> {
    let total: u64 = candidates.iter().map(|t| u64::from(t.frequency)).sum();
    if total == 0 {
        return Ok(());
    }
    for candidate in candidates {
        let share = u64::from(candidate.frequency) * u64::from(entry.nb_cooccs) / total;
        // share <= nb_cooccs, so it fits
        target.accumulate_entry(candidate, share as u32, entry.assoc_rate)?;
    }
    Ok(())
}

/// Everything to the candidate with the highest `measure`; the first one
/// wins ties. A NaN measure ranks lowest.
fn fill_with_most(
    target: &mut ContextVector,
    entry: &Entry,
    candidates: &[&Term],
    measure: TermProperty,
) -> Result<(), TermError> {
    let mut best: Option<(&Term, f64)> = None;
    for &candidate in candidates {
        let value = measure
            .value(candidate)
            .filter(|v| !v.is_nan())
            .unwrap_or(f64::NEG_INFINITY);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((candidate, value)),
        }
    }
    if let Some((winner, _)) = best {
        target.accumulate_entry(winner, entry.nb_cooccs, entry.assoc_rate)?;
    }
    Ok(())
}

/// `count / n` (rounded down) and `rate / n` to each of the n candidates.
fn fill_equi_repartition(
    target: &mut ContextVector,
    entry: &Entry,
    candidates: &[&Term],
) -> Result<(), TermError> {
    if candidates.is_empty() {
        return Ok(());
    }
    let n = candidates.len();
    let share = entry.nb_cooccs / n as u32;
    let rate = entry.assoc_rate / n as f64;
    for candidate in candidates {
        target.accumulate_entry(candidate, share, rate)?;
    }
    Ok(())
}
