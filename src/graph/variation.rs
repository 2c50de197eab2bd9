// Variant edges between terms.

use serde::{Deserialize, Serialize};

use super::term::TermId;

/// The kind of transformation that turned a base term into its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationType {
    Syntactic,
    Morphological,
    Derivational,
    Prefix,
    Compound,
    Graphical,
}

impl VariationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariationType::Syntactic => "syntactic",
            VariationType::Morphological => "morphological",
            VariationType::Derivational => "derivational",
            VariationType::Prefix => "prefix",
            VariationType::Compound => "compound",
            VariationType::Graphical => "graphical",
        }
    }
}

impl std::fmt::Display for VariationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directed edge `base -> variant`, labelled with its kind and the rule
/// (or other free-form info) that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermVariation {
    pub base: TermId,
    pub variant: TermId,
    pub kind: VariationType,
    pub info: String,
}
