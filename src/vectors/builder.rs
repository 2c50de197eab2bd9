// Context vector construction from term occurrences.
//
// Documents come in as sequences of term occurrences (the annotation
// pipeline has already mapped text spans to terms). For each occurrence of a
// term, every other occurrence within `scope` positions on either side is a
// cooccurrence. Neighbours that resolve to the term itself (the same term, or
// a term of the same class when classes are used) are skipped.

use std::collections::HashMap;

use tracing::info;

use super::context::ContextVector;
use crate::error::TermError;
use crate::graph::index::TermIndex;
use crate::graph::term::TermId;

#[derive(Debug, Clone)]
pub struct ContextBuilder {
    /// Window half-width, in occurrences
    pub scope: usize,
    /// Entries counted fewer times than this are dropped
    pub min_cooccurrences: u32,
    /// Count class heads instead of terms
    pub use_term_classes: bool,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            scope: 3,
            min_cooccurrences: 1,
            use_term_classes: false,
        }
    }
}

impl ContextBuilder {
    /// Build the context vector of a single term.
    pub fn build(
        &self,
        index: &TermIndex,
        term: TermId,
        documents: &[Vec<TermId>],
    ) -> Result<ContextVector, TermError> {
        let own_key = index.term(term)?.resolve(self.use_term_classes)?;
        let mut vector = ContextVector::for_term(term, self.use_term_classes);

        for doc in documents {
            for (pos, &occ) in doc.iter().enumerate() {
                if occ == term {
                    self.count_window(index, doc, pos, own_key, &mut vector)?;
                }
            }
        }

        vector.retain_min_cooccs(self.min_cooccurrences);
        Ok(vector)
    }

    /// Build and store the context vector of every term in the index, in a
    /// single pass over the documents. Returns the number of vectors stored.
    pub fn compute_all(
        &self,
        index: &mut TermIndex,
        documents: &[Vec<TermId>],
    ) -> Result<usize, TermError> {
        let mut vectors: HashMap<TermId, ContextVector> = HashMap::new();

        for term in index.iter() {
            // Fail before any document is read
            term.resolve(self.use_term_classes)?;
            vectors.insert(term.id, ContextVector::for_term(term.id, self.use_term_classes));
        }

        for doc in documents {
            for (pos, &occ) in doc.iter().enumerate() {
                let Some(term) = index.get(occ) else {
                    continue;
                };
                let own_key = term.resolve(self.use_term_classes)?;
                if let Some(vector) = vectors.get_mut(&occ) {
                    self.count_window(index, doc, pos, own_key, vector)?;
                }
            }
        }

        let count = vectors.len();
        let mut total_entries = 0;
        for (id, mut vector) in vectors {
            vector.retain_min_cooccs(self.min_cooccurrences);
            total_entries += vector.len();
            index.set_context_vector(id, vector)?;
        }

        info!(
            vectors = count,
            entries = total_entries,
            scope = self.scope,
            term_classes = self.use_term_classes,
            "Computed context vectors"
        );
        Ok(count)
    }

    fn count_window(
        &self,
        index: &TermIndex,
        doc: &[TermId],
        pos: usize,
        own_key: TermId,
        vector: &mut ContextVector,
    ) -> Result<(), TermError> {
        let lo = pos.saturating_sub(self.scope);
        let hi = (pos + self.scope).min(doc.len().saturating_sub(1));
        for (j, &neighbour) in doc.iter().enumerate().take(hi + 1).skip(lo) {
            if j == pos {
                continue;
            }
            // Terms removed by filtering may still appear in the documents
            let Some(co_term) = index.get(neighbour) else {
                continue;
            };
            if co_term.resolve(self.use_term_classes)? == own_key {
                continue;
            }
            vector.add_cooccurrence(co_term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // T1 T2 T3 T1 T3 T3 T1
    fn fixture() -> (TermIndex, Vec<Vec<TermId>>, [TermId; 3]) {
        let mut index = TermIndex::new();
        let t1 = index.add_term("term1", "term1", 3);
        let t2 = index.add_term("term2", "term2", 1);
        let t3 = index.add_term("term3", "term3", 3);
        let doc = vec![t1, t2, t3, t1, t3, t3, t1];
        (index, vec![doc], [t1, t2, t3])
    }

    #[test]
    fn test_scope_one() {
        let (index, docs, [t1, t2, t3]) = fixture();
        let builder = ContextBuilder {
            scope: 1,
            ..ContextBuilder::default()
        };
        let v = builder.build(&index, t1, &docs).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.nb_cooccs(t2), 1);
        assert_eq!(v.nb_cooccs(t3), 3);

        let v = builder.build(&index, t3, &docs).unwrap();
        assert_eq!(v.nb_cooccs(t1), 3);
        assert_eq!(v.nb_cooccs(t2), 1);
        assert_eq!(v.nb_cooccs(t3), 0);
    }

    #[test]
    fn test_min_cooccurrences_filters_entries() {
        let (index, docs, [t1, t2, t3]) = fixture();
        let builder = ContextBuilder {
            scope: 1,
            min_cooccurrences: 2,
            use_term_classes: false,
        };
        let v = builder.build(&index, t1, &docs).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v.nb_cooccs(t2), 0);
        assert_eq!(v.nb_cooccs(t3), 3);
        assert_eq!(v.total_cooccurrences(), 3);
    }

    #[test]
    fn test_empty_documents_give_empty_vectors() {
        let (mut index, _, [t1, _, _]) = fixture();
        let builder = ContextBuilder::default();
        assert_eq!(builder.compute_all(&mut index, &[vec![]]).unwrap(), 3);
        assert!(index.get(t1).unwrap().context_vector.as_ref().unwrap().is_empty());
    }
}
