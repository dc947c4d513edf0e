use actix_web::{error, web, Scope};

use crate::error::ApiError;
use crate::handlers::{health_check, list_languages, recommendations_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(list_languages)
        .configure(recommendations_config)
}

/// Malformed bodies get the same JSON error shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| error::Error::from(ApiError::InvalidInput(err.to_string())))
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| error::Error::from(ApiError::InvalidInput(err.to_string())))
}
