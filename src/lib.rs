pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{ApiError, Result};
pub use services::RecommendationService;
