// Term graph: terms, variant edges and term classes.

pub mod index;
pub mod property;
pub mod term;
pub mod variation;

pub use index::TermIndex;
pub use property::TermProperty;
pub use term::{Term, TermClass, TermId};
pub use variation::{TermVariation, VariationType};
