use crate::{catalog::Catalog, error::RecommendationError, models::BookId};
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Scores how well a free-text query matches a catalog title, on a 0–100 scale.
#[cfg_attr(test, automock)]
pub trait TitleMatcher: Send + Sync {
    fn similarity(&self, query: &str, title: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch {
    pub id: BookId,
    pub score: f64,
}

#[derive(Clone)]
pub struct TitleResolver {
    matcher: Arc<dyn TitleMatcher>,
    cutoff: f64,
}

impl TitleResolver {
    pub fn new(matcher: Arc<dyn TitleMatcher>, cutoff: f64) -> Self {
        Self { matcher, cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Finds the best-scoring title. Equal top scores go to the lexicographically smallest
    /// title so the outcome never depends on catalog order.
    pub fn resolve(
        &self,
        query: &str,
        catalog: &Catalog,
    ) -> Result<TitleMatch, RecommendationError> {
        if query.trim().is_empty() {
            return Err(RecommendationError::InvalidQuery {
                query: query.to_string(),
            });
        }

        let mut best: Option<(TitleMatch, &str)> = None;
        for (id, book) in catalog.iter() {
            let score = self.matcher.similarity(query, &book.title);
            if !score.is_finite() {
                continue;
            }
            let better = match &best {
                None => true,
                Some((current, title)) => {
                    score > current.score
                        || (score == current.score && book.title.as_str() < *title)
                }
            };
            if better {
                best = Some((TitleMatch { id, score }, book.title.as_str()));
            }
        }

        match best {
            Some((found, title)) if found.score >= self.cutoff => {
                debug!(query, title, score = found.score, "Resolved query title");
                Ok(found)
            }
            other => Err(RecommendationError::NoMatchFound {
                query: query.to_string(),
                best_score: other.map_or(0.0, |(m, _)| m.score),
                cutoff: self.cutoff,
            }),
        }
    }
}
