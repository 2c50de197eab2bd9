// ContextVector: sparse cooccurrence vector of a term.
//
// Maps each co-occurring term (or its class head when class folding is on)
// to a cooccurrence count and an association rate. The running total of
// counts is adjusted by every mutation so it always equals the sum of the
// entry counts.
//
// The rate-sorted view is memoized in `sorted`. Every mutation drops it and
// `entries()` rebuilds it on demand.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::cross_table::{AssociationRate, CrossTable};
use crate::error::TermError;
use crate::graph::term::{Term, TermId};

/// One component of a context vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub co_term: TermId,
    pub nb_cooccs: u32,
    pub assoc_rate: f64,
}

impl Entry {
    fn new(co_term: TermId, nb_cooccs: u32, assoc_rate: f64) -> Self {
        Self {
            co_term,
            nb_cooccs,
            assoc_rate,
        }
    }

    /// Descending rate, then descending count. Co-term id last, so equal
    /// vectors always sort identically.
    fn sort_order(a: &Entry, b: &Entry) -> Ordering {
        b.assoc_rate
            .total_cmp(&a.assoc_rate)
            .then_with(|| b.nb_cooccs.cmp(&a.nb_cooccs))
            .then_with(|| a.co_term.cmp(&b.co_term))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextVector {
    term: Option<TermId>,
    use_term_classes: bool,
    entries: HashMap<TermId, Entry>,
    total_cooccurrences: u64,
    sorted: Option<Vec<Entry>>,
}

impl ContextVector {
    /// A vector without owner term. Fine for translation targets; association
    /// rates cannot be computed on it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A vector owned by `term`, optionally counting class heads instead of
    /// terms.
    pub fn for_term(term: TermId, use_term_classes: bool) -> Self {
        Self {
            term: Some(term),
            use_term_classes,
            ..Self::default()
        }
    }

    pub fn term(&self) -> Option<TermId> {
        self.term
    }

    pub fn total_cooccurrences(&self) -> u64 {
        self.total_cooccurrences
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count one more cooccurrence with `co_term`.
    pub fn add_cooccurrence(&mut self, co_term: &Term) -> Result<(), TermError> {
        let key = co_term.resolve(self.use_term_classes)?;
        self.entries
            .entry(key)
            .or_insert_with(|| Entry::new(key, 0, 0.0))
            .nb_cooccs += 1;
        self.total_cooccurrences += 1;
        self.set_dirty();
        Ok(())
    }

    /// Add every cooccurrence of an iterator, stopping at the first failure.
    pub fn add_all_cooccurrences<'a, I>(&mut self, co_terms: I) -> Result<(), TermError>
    where
        I: IntoIterator<Item = &'a Term>,
    {
        for t in co_terms {
            self.add_cooccurrence(t)?;
        }
        Ok(())
    }

    /// Set the entry for `co_term`, replacing any previous one.
    pub fn add_entry(&mut self, co_term: &Term, nb_cooccs: u32, assoc_rate: f64) -> Result<(), TermError> {
        let key = co_term.resolve(self.use_term_classes)?;
        if let Some(old) = self.entries.insert(key, Entry::new(key, nb_cooccs, assoc_rate)) {
            self.total_cooccurrences -= u64::from(old.nb_cooccs);
        }
        self.total_cooccurrences += u64::from(nb_cooccs);
        self.set_dirty();
        Ok(())
    }

    /// Add `nb_cooccs` and `assoc_rate` onto the entry for `co_term`,
    /// creating it when absent.
    pub fn accumulate_entry(
        &mut self,
        co_term: &Term,
        nb_cooccs: u32,
        assoc_rate: f64,
    ) -> Result<(), TermError> {
        let key = co_term.resolve(self.use_term_classes)?;
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::new(key, 0, 0.0));
        entry.nb_cooccs += nb_cooccs;
        entry.assoc_rate += assoc_rate;
        self.total_cooccurrences += u64::from(nb_cooccs);
        self.set_dirty();
        Ok(())
    }

    pub fn remove_co_term(&mut self, co_term: &Term) -> Result<(), TermError> {
        let key = co_term.resolve(self.use_term_classes)?;
        if let Some(old) = self.entries.remove(&key) {
            self.total_cooccurrences -= u64::from(old.nb_cooccs);
        }
        self.set_dirty();
        Ok(())
    }

    /// Drop every entry counted fewer than `min` times.
    pub fn retain_min_cooccs(&mut self, min: u32) {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.nb_cooccs >= min);
        if self.entries.len() != before {
            self.total_cooccurrences = self.entries.values().map(|e| u64::from(e.nb_cooccs)).sum();
            self.set_dirty();
        }
    }

    fn set_dirty(&mut self) {
        self.sorted = None;
    }

    /// Entries sorted by descending association rate, then descending count.
    ///
    /// Builds and caches the sorted view if a mutation invalidated it.
    pub fn entries(&mut self) -> &[Entry] {
        let entries = &self.entries;
        self.sorted.get_or_insert_with(|| Self::sort_entries(entries))
    }

    /// The sorted view, without populating the cache.
    pub fn sorted_entries(&self) -> Vec<Entry> {
        match &self.sorted {
            Some(sorted) => sorted.clone(),
            None => Self::sort_entries(&self.entries),
        }
    }

    /// Whether the sorted view is currently cached.
    pub fn is_sorted_cached(&self) -> bool {
        self.sorted.is_some()
    }

    fn sort_entries(entries: &HashMap<TermId, Entry>) -> Vec<Entry> {
        let mut sorted: Vec<Entry> = entries.values().cloned().collect();
        sorted.sort_by(Entry::sort_order);
        sorted
    }

    pub fn nb_cooccs(&self, co_term: TermId) -> u32 {
        self.entries.get(&co_term).map_or(0, |e| e.nb_cooccs)
    }

    pub fn assoc_rate(&self, co_term: TermId) -> f64 {
        self.entries.get(&co_term).map_or(0.0, |e| e.assoc_rate)
    }

    pub fn terms(&self) -> impl Iterator<Item = TermId> + '_ {
        self.entries.keys().copied()
    }

    /// Rescale the association rates so they sum to 1. A vector whose rates
    /// sum to 0 is left untouched.
    pub fn normalize(&mut self) {
        let sum: f64 = self.entries.values().map(|e| e.assoc_rate).sum();
        if sum != 0.0 {
            for e in self.entries.values_mut() {
                e.assoc_rate /= sum;
            }
            self.set_dirty();
        }
    }

    /// Replace every association rate with the value `measure` gives for
    /// the owner term and the co-term in `table`, then optionally normalize.
    pub fn to_assoc_rate_vector(
        &mut self,
        table: &CrossTable,
        measure: &dyn AssociationRate,
        normalize: bool,
    ) -> Result<(), TermError> {
        let owner = self.term.ok_or(TermError::UnownedVector)?;
        for (co_term, entry) in self.entries.iter_mut() {
            entry.assoc_rate = table.compute_rate(measure, owner, *co_term);
        }
        if normalize {
            self.normalize();
        }
        self.set_dirty();
        debug!(term = %owner, measure = measure.name(), entries = self.entries.len(), "Computed association rates");
        Ok(())
    }
}

impl PartialEq for ContextVector {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term && self.sorted_entries() == other.sorted_entries()
    }
}

impl std::fmt::Display for ContextVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owner = self
            .term
            .map(|t| t.to_string())
            .unwrap_or_else(|| "no parent term".to_string());
        let parts: Vec<String> = self
            .sorted_entries()
            .iter()
            .map(|e| format!("{}: {:.3} ({})", e.co_term, e.assoc_rate, e.nb_cooccs))
            .collect();
        write!(f, "<{}> {{{}}}", owner, parts.join(", "))
    }
}
