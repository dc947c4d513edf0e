use crate::{
    catalog::Catalog,
    error::RecommendationError,
    models::{Book, BookId, FilterSpec},
    services::{
        filter::filter_candidates,
        fuzzy::WeightedRatio,
        ranker::{CosineSimilarity, Ranker, ScoredBook, SimilarityScorer},
        title_resolver::{TitleMatcher, TitleResolver},
    },
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MATCH_CUTOFF: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderSettings {
    /// Minimum fuzzy score (0–100) a title needs to count as a match
    pub match_cutoff: f64,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            match_cutoff: DEFAULT_MATCH_CUTOFF,
        }
    }
}

/// Outcome of a successful request: the resolved query book and its ranked neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub query_id: BookId,
    pub matched_title: String,
    pub match_score: f64,
    pub results: Vec<ScoredBook>,
}

impl Recommendation {
    /// Ranked results paired with their catalog records.
    pub fn books<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (BookId, &'a Book, f32)> + 'a {
        self.results
            .iter()
            .filter_map(move |r| catalog.book(r.id).map(|book| (r.id, book, r.score)))
    }
}

/// Resolves a title, filters the catalog and ranks the survivors by embedding similarity.
///
/// The service holds no per-request state; one instance is shared by every worker.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    resolver: TitleResolver,
    ranker: Ranker,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        matcher: Arc<dyn TitleMatcher>,
        scorer: Arc<dyn SimilarityScorer>,
        settings: RecommenderSettings,
    ) -> Self {
        Self {
            catalog,
            resolver: TitleResolver::new(matcher, settings.match_cutoff),
            ranker: Ranker::new(scorer),
        }
    }

    /// Fuzzy title matching and cosine ranking.
    pub fn with_defaults(catalog: Arc<Catalog>, settings: RecommenderSettings) -> Self {
        Self::new(
            catalog,
            Arc::new(WeightedRatio),
            Arc::new(CosineSimilarity),
            settings,
        )
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn recommend(
        &self,
        query: &str,
        filters: &FilterSpec,
        top_n: usize,
    ) -> Result<Recommendation, RecommendationError> {
        let trimmed_query = query.trim();
        if trimmed_query.is_empty() {
            warn!("Rejected empty query");
            return Err(RecommendationError::InvalidQuery {
                query: query.to_string(),
            });
        }
        Self::validate(filters, top_n)?;

        let found = self.resolver.resolve(trimmed_query, &self.catalog)?;
        let matched_title = self
            .catalog
            .book(found.id)
            .map(|b| b.title.clone())
            .unwrap_or_default();

        let candidates = filter_candidates(&self.catalog, filters)?;
        debug!(
            candidates = candidates.len(),
            %filters,
            "Filtered catalog"
        );

        let results = match self.catalog.embedding(found.id) {
            Some(query_vector) => {
                self.ranker
                    .top_k(query_vector, &candidates, &self.catalog, top_n)
            }
            None => Vec::new(),
        };

        info!(
            query = trimmed_query,
            matched_title = %matched_title,
            match_score = found.score,
            returned = results.len(),
            "Recommendations ready"
        );

        Ok(Recommendation {
            query_id: found.id,
            matched_title,
            match_score: found.score,
            results,
        })
    }

    fn validate(filters: &FilterSpec, top_n: usize) -> Result<(), RecommendationError> {
        if top_n == 0 {
            return Err(RecommendationError::InvalidParameter {
                name: "top_n",
                reason: "must be at least 1".into(),
            });
        }
        if let Some(min_rating) = filters.min_rating {
            if !min_rating.is_finite() {
                return Err(RecommendationError::InvalidParameter {
                    name: "min_rating",
                    reason: "must be a finite number".into(),
                });
            }
        }
        Ok(())
    }
}
