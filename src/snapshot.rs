// Corpus snapshot: JSON input for the command-line tool.
//
// A snapshot is what the annotation pipeline would hand over: the terms with
// their statistics, optional term classes and variant edges, and the
// documents as sequences of term grouping keys.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TermError;
use crate::graph::index::TermIndex;
use crate::graph::term::TermId;
use crate::graph::variation::VariationType;
use crate::vectors::builder::ContextBuilder;
use crate::vectors::cross_table::{AssociationRate, CrossTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTerm {
    pub grouping_key: String,
    pub lemma: String,
    pub frequency: u32,
    #[serde(default)]
    pub specificity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotClass {
    pub head: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotVariation {
    pub base: String,
    pub variant: String,
    pub kind: VariationType,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub terms: Vec<SnapshotTerm>,
    #[serde(default)]
    pub classes: Vec<SnapshotClass>,
    #[serde(default)]
    pub variations: Vec<SnapshotVariation>,
    /// Each document is a sequence of term grouping keys
    #[serde(default)]
    pub documents: Vec<Vec<String>>,
}

impl CorpusSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: CorpusSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        info!(
            path = %path.display(),
            terms = snapshot.terms.len(),
            documents = snapshot.documents.len(),
            "Loaded corpus snapshot"
        );
        Ok(snapshot)
    }

    /// Build the term index: terms, classes and variant edges.
    pub fn to_index(&self) -> Result<TermIndex, TermError> {
        let mut index = TermIndex::new();
        for t in &self.terms {
            let id = index.add_term(&t.grouping_key, &t.lemma, t.frequency);
            if let Some(term) = index.get_mut(id) {
                term.specificity = t.specificity;
            }
        }
        let total: u64 = self.terms.iter().map(|t| u64::from(t.frequency)).sum();
        if total > 0 {
            for term in index.iter_mut() {
                term.frequency_norm = f64::from(term.frequency) / total as f64;
            }
        }

        for class in &self.classes {
            let head = lookup(&index, &class.head)?;
            let members = class
                .members
                .iter()
                .map(|m| lookup(&index, m))
                .collect::<Result<Vec<_>, _>>()?;
            index.set_term_class(head, &members)?;
        }

        for v in &self.variations {
            let base = lookup(&index, &v.base)?;
            let variant = lookup(&index, &v.variant)?;
            index.add_variation(base, variant, v.kind, &v.info)?;
        }
        Ok(index)
    }

    /// The documents as term id sequences.
    pub fn document_ids(&self, index: &TermIndex) -> Result<Vec<Vec<TermId>>, TermError> {
        self.documents
            .iter()
            .map(|doc| doc.iter().map(|key| lookup(index, key)).collect())
            .collect()
    }

    /// Build the index and the association-rate context vector of every term.
    pub fn to_index_with_vectors(
        &self,
        builder: &ContextBuilder,
        measure: &dyn AssociationRate,
    ) -> Result<TermIndex, TermError> {
        let mut index = self.to_index()?;
        let documents = self.document_ids(&index)?;
        builder.compute_all(&mut index, &documents)?;

        let table = CrossTable::from_index(&index);
        for term in index.iter_mut() {
            if let Some(vector) = term.context_vector.as_mut() {
                vector.to_assoc_rate_vector(&table, measure, true)?;
            }
        }
        Ok(index)
    }
}

fn lookup(index: &TermIndex, key: &str) -> Result<TermId, TermError> {
    index
        .id_of(key)
        .ok_or_else(|| TermError::UnknownTerm(key.to_string()))
}
