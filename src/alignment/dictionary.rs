// Lookup interfaces used by translation: the bilingual dictionary and the
// target vocabulary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::index::TermIndex;
use crate::graph::term::Term;

/// Source lemma -> candidate target lemmas.
pub trait BilingualDictionary {
    fn translations(&self, source_lemma: &str) -> &[String];
}

/// Target lemma -> terms of the target vocabulary.
pub trait TargetVocabulary {
    fn terms_by_lemma(&self, lemma: &str) -> Vec<&Term>;
}

impl TargetVocabulary for TermIndex {
    fn terms_by_lemma(&self, lemma: &str) -> Vec<&Term> {
        TermIndex::terms_by_lemma(self, lemma)
    }
}

/// Dictionary held in memory, in insertion order per source lemma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut dico = Self::new();
        for (source, target) in pairs {
            dico.add_translation(source, target);
        }
        dico
    }

    /// Register a translation. Duplicates are ignored.
    pub fn add_translation(&mut self, source_lemma: &str, target_lemma: &str) {
        let targets = self.entries.entry(source_lemma.to_string()).or_default();
        if !targets.iter().any(|t| t == target_lemma) {
            targets.push(target_lemma.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BilingualDictionary for InMemoryDictionary {
    fn translations(&self, source_lemma: &str) -> &[String] {
        self.entries
            .get(source_lemma)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
