// Context vectors: construction, association rates and comparison.

pub mod builder;
pub mod context;
pub mod cross_table;
pub mod similarity;

pub use builder::ContextBuilder;
pub use context::{ContextVector, Entry};
pub use cross_table::{AssociationMeasure, AssociationRate, CrossTable, LogLikelihood, MutualInformation};
pub use similarity::SimilarityMeasure;
