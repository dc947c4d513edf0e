pub mod filter;
pub mod fuzzy;
pub mod ranker;
pub mod recommendation;
pub mod title_resolver;

// Re-export public types
pub use filter::filter_candidates;
pub use fuzzy::WeightedRatio;
pub use ranker::{CosineSimilarity, Ranker, ScoredBook, SimilarityScorer};
pub use recommendation::{Recommendation, RecommendationService, RecommenderSettings};
pub use title_resolver::{TitleMatch, TitleMatcher, TitleResolver};
