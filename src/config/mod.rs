pub mod scorer;

pub use scorer::{ScorerConfig, ScoringSection, Vocabulary};
