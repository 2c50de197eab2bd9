// Bilingual alignment: context vector translation and candidate ranking.

pub mod aligner;
pub mod dictionary;
pub mod strategy;
pub mod translate;

pub use aligner::{AlignmentCandidate, BilingualAligner};
pub use dictionary::{BilingualDictionary, InMemoryDictionary, TargetVocabulary};
pub use strategy::TranslationStrategy;
pub use translate::{candidate_translations, translate_vector};
