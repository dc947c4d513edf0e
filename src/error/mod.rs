use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::FilterSpec;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures raised while building the catalog. Any of these prevents the service from starting.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Inconsistent catalog: {books} books but {embeddings} embedding rows")]
    InconsistentCatalog { books: usize, embeddings: usize },

    #[error("Catalog contains no books")]
    EmptyCatalog,

    #[error("Book at row {row} has an empty {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("Duplicate title in catalog: {0}")]
    DuplicateTitle(String),

    #[error("Embedding row {row} contains a non-finite value")]
    NonFiniteEmbedding { row: usize },

    #[error("Embedding row {row} has dimension {got}, expected {expected}")]
    RaggedEmbeddings {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Failed to read catalog data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse books CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse embeddings: {0}")]
    Embeddings(#[from] serde_json::Error),

    #[error("Invalid embedding matrix shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Per-request failures of the recommendation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("Query cannot be empty: '{query}'")]
    InvalidQuery { query: String },

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("No book title matches '{query}' (best score {best_score:.1}, cutoff {cutoff:.1})")]
    NoMatchFound {
        query: String,
        best_score: f64,
        cutoff: f64,
    },

    #[error("No books satisfy the selected filters ({filters})")]
    NoCandidatesAfterFilter { filters: FilterSpec },
}

impl RecommendationError {
    pub fn code(&self) -> &'static str {
        match self {
            RecommendationError::InvalidQuery { .. } => "invalid_query",
            RecommendationError::InvalidParameter { .. } => "invalid_parameter",
            RecommendationError::NoMatchFound { .. } => "no_match_found",
            RecommendationError::NoCandidatesAfterFilter { .. } => "no_candidates_after_filter",
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request exceeded its {0}ms budget")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Recommendation(err) => err.code(),
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Timeout(_) => "timeout",
            ApiError::ConfigError(_) => "config_error",
            ApiError::InternalError(_) => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Recommendation(err) => match err {
                RecommendationError::InvalidQuery { .. }
                | RecommendationError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
                RecommendationError::NoMatchFound { .. } => StatusCode::NOT_FOUND,
                RecommendationError::NoCandidatesAfterFilter { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        })
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
