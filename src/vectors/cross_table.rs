// Cross table of pairwise cooccurrence counts and association measures.
//
// The table is computed once from every context vector of a term index and
// is read-only afterwards, so it can be shared across terms while their
// vectors are rewritten with association rates.
//
// For a term x and a co-term y the 2x2 contingency table is:
//
//   a = cooccurrences of x with y
//   b = cooccurrences of x with anything but y
//   c = cooccurrences of y with anything but x
//   d = all remaining cooccurrences

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TermError;
use crate::graph::index::TermIndex;
use crate::graph::term::TermId;

/// A statistical affinity measure over a 2x2 contingency table.
pub trait AssociationRate {
    fn name(&self) -> &'static str;

    fn value(&self, a: f64, b: f64, c: f64, d: f64) -> f64;
}

/// Pointwise mutual information, in bits. Zero when the pair never
/// cooccurs.
pub struct MutualInformation;

impl AssociationRate for MutualInformation {
    fn name(&self) -> &'static str {
        "mutual-information"
    }

    fn value(&self, a: f64, b: f64, c: f64, d: f64) -> f64 {
        let n = a + b + c + d;
        let expected = (a + b) * (a + c);
        if a <= 0.0 || expected <= 0.0 {
            return 0.0;
        }
        (a * n / expected).log2()
    }
}

/// Dunning's log-likelihood ratio.
pub struct LogLikelihood;

fn x_ln_x(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x * x.ln()
    }
}

impl AssociationRate for LogLikelihood {
    fn name(&self) -> &'static str {
        "log-likelihood"
    }

    fn value(&self, a: f64, b: f64, c: f64, d: f64) -> f64 {
        x_ln_x(a) + x_ln_x(b) + x_ln_x(c) + x_ln_x(d)
            - x_ln_x(a + b)
            - x_ln_x(a + c)
            - x_ln_x(b + d)
            - x_ln_x(c + d)
            + x_ln_x(a + b + c + d)
    }
}

/// Named selection of the built-in measures, for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssociationMeasure {
    MutualInformation,
    LogLikelihood,
}

impl AssociationMeasure {
    pub fn rate(&self) -> &'static dyn AssociationRate {
        match self {
            AssociationMeasure::MutualInformation => &MutualInformation,
            AssociationMeasure::LogLikelihood => &LogLikelihood,
        }
    }
}

impl FromStr for AssociationMeasure {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "mutual-information" | "mi" => Ok(AssociationMeasure::MutualInformation),
            "log-likelihood" | "ll" => Ok(AssociationMeasure::LogLikelihood),
            other => Err(TermError::InvalidMeasure(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrossTable {
    pairs: HashMap<(TermId, TermId), u32>,
    /// Row totals, keyed by vector owner
    a_plus_b: HashMap<TermId, u64>,
    /// Column totals, keyed by co-term
    a_plus_c: HashMap<TermId, u64>,
    total: u64,
}

impl CrossTable {
    /// Collect the counts of every context vector in the index. Terms
    /// without a vector contribute nothing.
    pub fn from_index(index: &TermIndex) -> Self {
        let mut table = Self::default();
        for term in index.iter() {
            let Some(vector) = &term.context_vector else {
                continue;
            };
            for co_term in vector.terms() {
                let n = vector.nb_cooccs(co_term);
                table.pairs.insert((term.id, co_term), n);
                *table.a_plus_b.entry(term.id).or_insert(0) += u64::from(n);
                *table.a_plus_c.entry(co_term).or_insert(0) += u64::from(n);
                table.total += u64::from(n);
            }
        }
        info!(
            pairs = table.pairs.len(),
            total = table.total,
            "Built cooccurrence cross table"
        );
        table
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// The contingency table `(a, b, c, d)` for `x` and `y`.
    pub fn contingency(&self, x: TermId, y: TermId) -> (u64, u64, u64, u64) {
        let a = u64::from(self.pairs.get(&(x, y)).copied().unwrap_or(0));
        let b = self.a_plus_b.get(&x).copied().unwrap_or(0).saturating_sub(a);
        let c = self.a_plus_c.get(&y).copied().unwrap_or(0).saturating_sub(a);
        let d = self.total.saturating_sub(a + b + c);
        (a, b, c, d)
    }

    pub fn compute_rate(&self, measure: &dyn AssociationRate, x: TermId, y: TermId) -> f64 {
        let (a, b, c, d) = self.contingency(x, y);
        measure.value(a as f64, b as f64, c as f64, d as f64)
    }
}
