use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use book::{Book, BookId, BookRecommendation};
pub use filter::{FilterPredicate, FilterSpec};

mod book;
mod filter;

/// Request structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Title (or approximate title) of the book to find similar books for
    pub query: String,
    /// Number of recommendations to return; the configured default applies when absent
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub min_year: Option<i32>,
    #[serde(default)]
    pub author: Option<String>,
}

impl RecommendationRequest {
    /// Blank language and author strings mean "no filter".
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            min_rating: self.min_rating,
            language_code: non_blank(self.language_code.as_deref()),
            min_year: self.min_year,
            author: non_blank(self.author.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    /// The query as submitted
    pub query: String,
    /// Catalog title the query resolved to
    pub matched_title: String,
    /// Fuzzy match confidence in [0, 100]
    pub match_score: f64,
    pub recommendations: Vec<BookRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Number of books in the loaded catalog
    pub books: usize,
    /// Embedding dimension
    pub dimension: usize,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
}
