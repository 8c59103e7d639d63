//! Candidate scoring, ranking, and explanation.

pub mod candidate;
pub mod explain;
pub mod scorer;

pub use candidate::{ActionCandidate, EnhancedRecommendation};
pub use scorer::{RecommendationScorer, ScoreWeights};
