// Flat scorifier: threshold filtering and ordering of a scored model.
//
// Two passes, terms first, then the variant list of every surviving term.
// A term goes if its orthographic score or its independence score is below
// threshold. A variant goes if its variant-independence or variation score
// is below threshold, or, for variants built by extension, if its extension
// gain or extension specificity is below threshold.
//
// Survivors are ordered by descending termhood; variant lists by descending
// variation score, then base key, then variant key. Running the pass on its
// own output changes nothing.
//
// Variant edges in the term index are not touched here. The report lists the
// removed terms so the caller can drop them from the index.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::{ScoredModel, ScoredTerm, ScoredVariation};
use crate::graph::index::TermIndex;

/// Configurable filter thresholds. A score strictly below its threshold
/// removes the term or variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Minimum orthographic well-formedness of a term (default 0.55)
    pub orthographic_score_th: f64,
    /// Minimum term independence (default 0.10)
    pub term_independence_th: f64,
    /// Minimum variant independence (default 0)
    pub variant_independence_th: f64,
    /// Minimum variation score (default 0)
    pub variation_score_th: f64,
    /// Minimum extension gain, checked only for extension variants (default 0)
    pub extension_gain_th: f64,
    /// Minimum extension specificity, checked only for extension variants (default 0)
    pub extension_spec_th: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            orthographic_score_th: 0.55,
            term_independence_th: 0.10,
            variant_independence_th: 0.0,
            variation_score_th: 0.0,
            extension_gain_th: 0.0,
            extension_spec_th: 0.0,
        }
    }
}

impl FilterThresholds {
    /// Only a score strictly below its threshold removes the term, so a NaN
    /// score never does.
    pub fn keeps_term(&self, term: &ScoredTerm) -> bool {
        !(term.orthographic_score < self.orthographic_score_th
            || term.independence_score < self.term_independence_th)
    }

    pub fn keeps_variation(&self, v: &ScoredVariation) -> bool {
        let below_extension = v.extension_affix.is_some()
            && (v.extension_gain_score < self.extension_gain_th
                || v.extension_spec_score < self.extension_spec_th);
        !(v.variant_independence_score < self.variant_independence_th
            || v.variation_score < self.variation_score_th
            || below_extension)
    }
}

/// Counts before and after a filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterReport {
    pub terms_before: usize,
    pub terms_after: usize,
    pub variations_before: usize,
    pub variations_after: usize,
    /// Grouping keys of the removed terms
    pub removed_terms: Vec<String>,
}

impl FilterReport {
    pub fn removed_term_count(&self) -> usize {
        self.terms_before - self.terms_after
    }

    pub fn removed_variation_count(&self) -> usize {
        self.variations_before - self.variations_after
    }

    /// Drop the removed terms, and their edges, from the index. Returns how
    /// many terms were found and removed.
    pub fn apply_to_index(&self, index: &mut TermIndex) -> usize {
        let ids: Vec<_> = self
            .removed_terms
            .iter()
            .filter_map(|key| index.id_of(key))
            .collect();
        index.remove_terms(&ids)
    }
}

/// Descending termhood, ties by ascending grouping key.
pub fn termhood_order(a: &ScoredTerm, b: &ScoredTerm) -> Ordering {
    b.wr_log
        .total_cmp(&a.wr_log)
        .then_with(|| a.grouping_key.cmp(&b.grouping_key))
}

/// Descending variation score, then ascending base key, then ascending
/// variant key.
pub fn variation_order(a: &ScoredVariation, b: &ScoredVariation) -> Ordering {
    b.variation_score
        .total_cmp(&a.variation_score)
        .then_with(|| a.base_key.cmp(&b.base_key))
        .then_with(|| a.variant_key.cmp(&b.variant_key))
}

#[derive(Debug, Clone, Default)]
pub struct FlatScorifier {
    pub thresholds: FilterThresholds,
}

impl FlatScorifier {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    /// Filter and order the model in place.
    pub fn run(&self, model: &mut ScoredModel) -> FilterReport {
        info!("Start flat scorifier");
        let mut report = FilterReport {
            terms_before: model.len(),
            ..FilterReport::default()
        };

        self.filter_terms(model, &mut report);
        report.terms_after = model.len();
        info!(
            removed = report.removed_term_count(),
            total = report.terms_before,
            "Filtered terms"
        );

        for term in model.terms_mut() {
            report.variations_before += term.variations.len();
            term.variations.retain(|v| self.thresholds.keeps_variation(v));
            term.variations.sort_by(variation_order);
            report.variations_after += term.variations.len();
        }
        info!(
            removed = report.removed_variation_count(),
            total = report.variations_before,
            "Filtered variants"
        );

        model.sort_by(termhood_order);
        report
    }

    fn filter_terms(&self, model: &mut ScoredModel, report: &mut FilterReport) {
        let removed: HashSet<String> = model
            .terms()
            .iter()
            .filter(|t| !self.thresholds.keeps_term(t))
            .map(|t| t.grouping_key.clone())
            .collect();
        if removed.is_empty() {
            return;
        }
        model.remove_terms(&removed);
        let mut keys: Vec<String> = removed.into_iter().collect();
        keys.sort();
        report.removed_terms = keys;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::variation::VariationType;

    fn term(key: &str, wr: f64, ortho: f64, indep: f64) -> ScoredTerm {
        ScoredTerm {
            grouping_key: key.to_string(),
            lemma: key.to_string(),
            wr_log: wr,
            orthographic_score: ortho,
            independence_score: indep,
            variations: vec![],
        }
    }

    fn variation(base: &str, variant: &str, score: f64) -> ScoredVariation {
        ScoredVariation {
            base_key: base.to_string(),
            variant_key: variant.to_string(),
            kind: VariationType::Syntactic,
            info: String::new(),
            variant_independence_score: 0.5,
            variation_score: score,
            extension_affix: None,
            extension_gain_score: 0.0,
            extension_spec_score: 0.0,
        }
    }

    #[test]
    fn test_bad_orthography_removed_regardless_of_independence() {
        let th = FilterThresholds::default();
        assert!(!th.keeps_term(&term("a", 1.0, 0.40, 0.99)));
        assert!(th.keeps_term(&term("a", 1.0, 0.55, 0.10)));
        assert!(!th.keeps_term(&term("a", 1.0, 0.9, 0.09)));
    }

    #[test]
    fn test_extension_scores_only_checked_with_affix() {
        let th = FilterThresholds::default();
        let mut v = variation("a", "b", 1.0);
        v.extension_gain_score = -1.0;
        assert!(th.keeps_variation(&v));
        v.extension_affix = Some("eolien".to_string());
        assert!(!th.keeps_variation(&v));
        v.extension_gain_score = 0.0;
        v.extension_spec_score = -0.1;
        assert!(!th.keeps_variation(&v));
        v.extension_spec_score = 0.0;
        assert!(th.keeps_variation(&v));
    }

    #[test]
    fn test_variation_order_tiebreaks() {
        let mut vs = vec![
            variation("b", "y", 1.0),
            variation("a", "z", 1.0),
            variation("a", "y", 1.0),
            variation("c", "c", 2.0),
        ];
        vs.sort_by(variation_order);
        let keys: Vec<(&str, &str)> = vs
            .iter()
            .map(|v| (v.base_key.as_str(), v.variant_key.as_str()))
            .collect();
        assert_eq!(keys, vec![("c", "c"), ("a", "y"), ("a", "z"), ("b", "y")]);
    }

    #[test]
    fn test_run_reports_counts() {
        let mut t = term("keep", 2.0, 1.0, 0.5);
        t.variations = vec![variation("keep", "v1", 0.3), variation("keep", "v2", -0.3)];
        let mut model = ScoredModel::new(vec![term("drop", 5.0, 0.1, 0.5), t]);

        let report = FlatScorifier::default().run(&mut model);
        assert_eq!(report.terms_before, 2);
        assert_eq!(report.terms_after, 1);
        assert_eq!(report.removed_terms, vec!["drop".to_string()]);
        assert_eq!(report.variations_before, 2);
        assert_eq!(report.variations_after, 1);
        assert_eq!(model.terms()[0].variations[0].variant_key, "v1");
    }

    #[test]
    fn test_empty_model_is_noop() {
        let mut model = ScoredModel::default();
        let report = FlatScorifier::default().run(&mut model);
        assert_eq!(report, FilterReport::default());
    }
}
