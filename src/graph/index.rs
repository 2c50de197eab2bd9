// TermIndex: flat arena of terms plus the variant graph between them.
//
// Terms are stored in slots addressed by TermId. Removing a term leaves an
// empty slot so ids handed out earlier stay valid. Variant edges are kept in
// two adjacency lists per slot (outgoing variants and incoming bases); both
// sides are updated together.
//
// The variant graph may contain cycles, including a term listed as its own
// variant. Traversals carry an explicit visited set.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::term::{Term, TermClass, TermId};
use super::variation::{TermVariation, VariationType};
use crate::error::TermError;
use crate::vectors::context::ContextVector;

#[derive(Debug, Default)]
pub struct TermIndex {
    terms: Vec<Option<Term>>,
    by_key: HashMap<String, TermId>,
    by_lemma: HashMap<String, Vec<TermId>>,
    variations: Vec<Vec<TermVariation>>,
    bases: Vec<Vec<TermVariation>>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, or return the id of the term already registered under
    /// this grouping key.
    pub fn add_term(&mut self, grouping_key: &str, lemma: &str, frequency: u32) -> TermId {
        if let Some(&id) = self.by_key.get(grouping_key) {
            return id;
        }
        let id = TermId(self.terms.len());
        self.terms.push(Some(Term::new(id, grouping_key, lemma, frequency)));
        self.variations.push(Vec::new());
        self.bases.push(Vec::new());
        self.by_key.insert(grouping_key.to_string(), id);
        self.by_lemma.entry(lemma.to_string()).or_default().push(id);
        id
    }

    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: TermId) -> Option<&mut Term> {
        self.terms.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Like `get`, but a missing term is an error.
    pub fn term(&self, id: TermId) -> Result<&Term, TermError> {
        self.get(id)
            .ok_or_else(|| TermError::UnknownTerm(id.to_string()))
    }

    pub fn term_by_grouping_key(&self, grouping_key: &str) -> Option<&Term> {
        self.by_key.get(grouping_key).and_then(|&id| self.get(id))
    }

    pub fn id_of(&self, grouping_key: &str) -> Option<TermId> {
        self.by_key.get(grouping_key).copied()
    }

    /// All live terms sharing this lemma, in insertion order.
    pub fn terms_by_lemma(&self, lemma: &str) -> Vec<&Term> {
        self.by_lemma
            .get(lemma)
            .map(|ids| ids.iter().filter_map(|&id| self.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Term> {
        self.terms.iter_mut().filter_map(Option::as_mut)
    }

    pub fn ids(&self) -> Vec<TermId> {
        self.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Add a `base -> variant` edge. Adding the same base/variant/kind/info
    /// twice keeps a single edge. Returns whether a new edge was stored.
    pub fn add_variation(
        &mut self,
        base: TermId,
        variant: TermId,
        kind: VariationType,
        info: &str,
    ) -> Result<bool, TermError> {
        self.term(base)?;
        self.term(variant)?;

        let edge = TermVariation {
            base,
            variant,
            kind,
            info: info.to_string(),
        };
        if self.variations[base.0].contains(&edge) {
            return Ok(false);
        }
        self.bases[variant.0].push(edge.clone());
        self.variations[base.0].push(edge);
        Ok(true)
    }

    /// Outgoing edges: the direct variants of `id`.
    pub fn variations_of(&self, id: TermId) -> &[TermVariation] {
        self.variations.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Incoming edges: the terms `id` is a direct variant of.
    pub fn bases_of(&self, id: TermId) -> &[TermVariation] {
        self.bases.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every variant reachable from `origin` in at most `depth` hops, sorted
    /// with `cmp`.
    ///
    /// The origin itself is never returned, even when a cycle leads back to
    /// it, and each term is returned at most once. Depth 0 yields nothing.
    pub fn get_variants<F>(&self, origin: TermId, depth: usize, mut cmp: F) -> Vec<&Term>
    where
        F: FnMut(&Term, &Term) -> Ordering,
    {
        let mut visited: HashSet<TermId> = HashSet::from([origin]);
        let mut frontier = vec![origin];
        let mut found = Vec::new();

        for _ in 0..depth {
            let mut next = Vec::new();
            for id in frontier {
                for edge in self.variations_of(id) {
                    if visited.insert(edge.variant) {
                        found.push(edge.variant);
                        next.push(edge.variant);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        let mut terms: Vec<&Term> = found.into_iter().filter_map(|id| self.get(id)).collect();
        terms.sort_by(|a, b| cmp(a, b));
        terms
    }

    /// Fold `members` onto `head`. The head is made a member of its own class.
    pub fn set_term_class(&mut self, head: TermId, members: &[TermId]) -> Result<TermClass, TermError> {
        self.term(head)?;
        for &m in members {
            self.term(m)?;
        }

        let mut class = TermClass {
            head,
            members: members.to_vec(),
        };
        if !class.members.contains(&head) {
            class.members.insert(0, head);
        }
        for &m in &class.members {
            if let Some(t) = self.get_mut(m) {
                t.class_head = Some(head);
            }
        }
        Ok(class)
    }

    pub fn set_context_vector(&mut self, id: TermId, vector: ContextVector) -> Result<(), TermError> {
        let term = self
            .get_mut(id)
            .ok_or_else(|| TermError::UnknownTerm(id.to_string()))?;
        term.context_vector = Some(vector);
        Ok(())
    }

    /// Remove a term together with every edge touching it. Terms whose class
    /// head was the removed term lose their class.
    pub fn remove_term(&mut self, id: TermId) -> Option<Term> {
        let term = self.terms.get_mut(id.0)?.take()?;

        for edge in std::mem::take(&mut self.variations[id.0]) {
            self.bases[edge.variant.0].retain(|e| e.base != id);
        }
        for edge in std::mem::take(&mut self.bases[id.0]) {
            self.variations[edge.base.0].retain(|e| e.variant != id);
        }

        self.by_key.remove(&term.grouping_key);
        if let Some(ids) = self.by_lemma.get_mut(&term.lemma) {
            ids.retain(|&i| i != id);
            if ids.is_empty() {
                self.by_lemma.remove(&term.lemma);
            }
        }
        for other in self.iter_mut() {
            if other.class_head == Some(id) {
                other.class_head = None;
            }
        }

        debug!(term = %term.grouping_key, "Removed term from index");
        Some(term)
    }

    /// Remove several terms; returns how many were actually present.
    pub fn remove_terms(&mut self, ids: &[TermId]) -> usize {
        ids.iter().filter(|&&id| self.remove_term(id).is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_term_is_keyed_by_grouping_key() {
        let mut index = TermIndex::new();
        let a = index.add_term("n: energie", "énergie", 4);
        let b = index.add_term("n: energie", "énergie", 9);
        assert_eq!(a, b);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(a).unwrap().frequency, 4);
    }

    #[test]
    fn test_add_variation_rejects_unknown_terms() {
        let mut index = TermIndex::new();
        let a = index.add_term("a", "a", 1);
        let res = index.add_variation(a, TermId(42), VariationType::Syntactic, "NA");
        assert!(matches!(res, Err(TermError::UnknownTerm(_))));
    }

    #[test]
    fn test_remove_term_drops_edges_on_both_sides() {
        let mut index = TermIndex::new();
        let a = index.add_term("a", "a", 1);
        let b = index.add_term("b", "b", 1);
        let c = index.add_term("c", "c", 1);
        index.add_variation(a, b, VariationType::Syntactic, "r1").unwrap();
        index.add_variation(b, c, VariationType::Syntactic, "r2").unwrap();

        let removed = index.remove_term(b).unwrap();
        assert_eq!(removed.grouping_key, "b");
        assert!(index.variations_of(a).is_empty());
        assert!(index.bases_of(c).is_empty());
        assert!(index.get(b).is_none());
        assert!(index.term_by_grouping_key("b").is_none());
        assert_eq!(index.len(), 2);
        // ids handed out before the removal stay valid
        assert_eq!(index.get(c).unwrap().grouping_key, "c");
    }

    #[test]
    fn test_remove_class_head_clears_members() {
        let mut index = TermIndex::new();
        let a = index.add_term("a", "a", 1);
        let b = index.add_term("b", "b", 1);
        index.set_term_class(a, &[b]).unwrap();
        assert_eq!(index.get(b).unwrap().class_head, Some(a));
        index.remove_term(a);
        assert_eq!(index.get(b).unwrap().class_head, None);
    }

    #[test]
    fn test_terms_by_lemma_skips_removed() {
        let mut index = TermIndex::new();
        let a = index.add_term("n: noir", "noir", 1);
        index.add_term("a: noir", "noir", 1);
        assert_eq!(index.terms_by_lemma("noir").len(), 2);
        index.remove_term(a);
        let left = index.terms_by_lemma("noir");
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].grouping_key, "a: noir");
        assert!(index.terms_by_lemma("blanc").is_empty());
    }
}
