use crate::{
    error::{ApiError, Result},
    services::recommendation::{RecommenderSettings, DEFAULT_MATCH_CUTOFF},
};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration, read from `config/default.toml` (optional) and `APP_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Books CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// JSON matrix with one embedding row per cleaned book
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: PathBuf,
    #[serde(default = "default_match_cutoff")]
    pub match_cutoff: f64,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_description_preview_chars")]
    pub description_preview_chars: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/books.csv")
}

fn default_embeddings_path() -> PathBuf {
    PathBuf::from("data/book_embeddings.json")
}

fn default_match_cutoff() -> f64 {
    DEFAULT_MATCH_CUTOFF
}

fn default_top_n() -> usize {
    5
}

fn default_description_preview_chars() -> usize {
    500
}

fn default_request_timeout_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            embeddings_path: default_embeddings_path(),
            match_cutoff: default_match_cutoff(),
            default_top_n: default_top_n(),
            description_preview_chars: default_description_preview_chars(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.match_cutoff) {
            return Err(ApiError::ConfigError(format!(
                "match_cutoff must be within [0, 100], got {}",
                self.match_cutoff
            )));
        }
        if self.default_top_n == 0 {
            return Err(ApiError::ConfigError(
                "default_top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn recommender_settings(&self) -> RecommenderSettings {
        RecommenderSettings {
            match_cutoff: self.match_cutoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_cutoff, 50.0);
        assert_eq!(config.recommender_settings(), RecommenderSettings::default());
    }

    #[test]
    fn rejects_out_of_range_cutoff() {
        let config = Config {
            match_cutoff: 120.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn rejects_zero_default_top_n() {
        let config = Config {
            default_top_n: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
