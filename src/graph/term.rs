// Term: one vocabulary entry of the term index.
//
// Terms live in the TermIndex arena and are addressed by TermId. Everything
// that points at another term (variant edges, class heads, context vector
// entries) stores the id, never a reference.

use serde::{Deserialize, Serialize};

use crate::error::TermError;
use crate::vectors::context::ContextVector;

/// Arena index of a term inside its TermIndex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub usize);

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A canonicalized vocabulary unit extracted from a corpus.
#[derive(Debug, Clone)]
pub struct Term {
    pub id: TermId,
    /// Canonical string identity, unique within an index
    pub grouping_key: String,
    pub lemma: String,
    /// Raw occurrence count in the corpus
    pub frequency: u32,
    /// Frequency normalized by corpus size
    pub frequency_norm: f64,
    /// Termhood (WR) score, higher means more domain-specific
    pub specificity: f64,
    /// Head of the class this term was folded into, if classes are built
    pub class_head: Option<TermId>,
    pub context_vector: Option<ContextVector>,
}

impl Term {
    pub fn new(id: TermId, grouping_key: &str, lemma: &str, frequency: u32) -> Self {
        Self {
            id,
            grouping_key: grouping_key.to_string(),
            lemma: lemma.to_string(),
            frequency,
            frequency_norm: 0.0,
            specificity: 0.0,
            class_head: None,
            context_vector: None,
        }
    }

    /// Resolve the id this term is counted under in a context vector.
    ///
    /// With term classes enabled the term is replaced by its class head, and
    /// a term without a class is a precondition failure.
    pub fn resolve(&self, use_term_classes: bool) -> Result<TermId, TermError> {
        if !use_term_classes {
            return Ok(self.id);
        }
        self.class_head.ok_or_else(|| TermError::MissingTermClass {
            grouping_key: self.grouping_key.clone(),
        })
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.grouping_key == other.grouping_key
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grouping_key)
    }
}

/// A set of terms folded onto one representative head.
#[derive(Debug, Clone, PartialEq)]
pub struct TermClass {
    pub head: TermId,
    pub members: Vec<TermId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_classes_is_identity() {
        let t = Term::new(TermId(4), "n: chat", "chat", 3);
        assert_eq!(t.resolve(false).unwrap(), TermId(4));
    }

    #[test]
    fn test_resolve_requires_class() {
        let mut t = Term::new(TermId(4), "n: chat", "chat", 3);
        assert_eq!(
            t.resolve(true),
            Err(TermError::MissingTermClass {
                grouping_key: "n: chat".to_string()
            })
        );
        t.class_head = Some(TermId(1));
        assert_eq!(t.resolve(true).unwrap(), TermId(1));
    }
}
