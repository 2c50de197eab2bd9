// Term properties usable as sort keys and ranking measures.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermProperty {
    Frequency,
    Specificity,
    GroupingKey,
    Lemma,
}

impl TermProperty {
    /// Numeric value of the property, for the measures that have one.
    pub fn value(&self, term: &Term) -> Option<f64> {
        match self {
            TermProperty::Frequency => Some(term.frequency as f64),
            TermProperty::Specificity => Some(term.specificity),
            TermProperty::GroupingKey | TermProperty::Lemma => None,
        }
    }

    /// Ascending comparison of two terms on this property.
    pub fn compare(&self, a: &Term, b: &Term) -> Ordering {
        match self {
            TermProperty::Frequency => a.frequency.cmp(&b.frequency),
            TermProperty::Specificity => a.specificity.total_cmp(&b.specificity),
            TermProperty::GroupingKey => a.grouping_key.cmp(&b.grouping_key),
            TermProperty::Lemma => a.lemma.cmp(&b.lemma),
        }
    }

    /// A comparator on this property, falling back to the grouping key so
    /// the order is total.
    pub fn comparator(self, descending: bool) -> impl Fn(&Term, &Term) -> Ordering {
        move |a, b| {
            let primary = if descending {
                self.compare(b, a)
            } else {
                self.compare(a, b)
            };
            primary.then_with(|| a.grouping_key.cmp(&b.grouping_key))
        }
    }
}
