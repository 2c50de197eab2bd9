// Scoring: scored model, orthography and threshold filtering.

pub mod filter;
pub mod model;
pub mod orthography;

pub use filter::{FilterReport, FilterThresholds, FlatScorifier};
pub use model::{ScoreProvider, ScoredModel, ScoredTerm, ScoredVariation, TermScores, VariationScores};
