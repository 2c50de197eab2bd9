// termkit: statistical core of a terminology-extraction pipeline
//
// This is the library root. Each module corresponds to one subsystem:
// the term graph, context vectors, scoring/filtering and bilingual
// alignment, plus the configuration and output layers used by the binary.

pub mod alignment;
pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod scoring;
pub mod snapshot;
pub mod vectors;

pub use error::TermError;
