// Error types for the library layer.
//
// The binary and config loader work in anyhow::Result like the rest of the
// application code; library operations return these typed errors so callers
// can match on the failure kind.

use thiserror::Error;

/// Failures raised by graph, vector and alignment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// A translation strategy name that matches none of the known strategies.
    #[error("invalid translation strategy: {0}")]
    InvalidStrategy(String),

    /// An association measure name that matches none of the known measures.
    #[error("invalid association measure: {0}")]
    InvalidMeasure(String),

    /// Class folding was requested but the term has no class assigned.
    #[error("term classes are enabled but term '{grouping_key}' has no term class")]
    MissingTermClass { grouping_key: String },

    /// A grouping key or id that is not present in the term index.
    #[error("unknown term: {0}")]
    UnknownTerm(String),

    /// The term has no context vector computed yet.
    #[error("term '{0}' has no context vector")]
    MissingContextVector(String),

    /// Association rates need the owner term of the vector.
    #[error("context vector has no owner term")]
    UnownedVector,
}
