use crate::{models::LanguagesResponse, services::RecommendationService};
use actix_web::{get, web, HttpResponse};

/// Language codes present in the catalog, for building a language filter.
#[get("/languages")]
pub async fn list_languages(
    recommendation_service: web::Data<RecommendationService>,
) -> HttpResponse {
    HttpResponse::Ok().json(LanguagesResponse {
        languages: recommendation_service.catalog().language_codes(),
    })
}
