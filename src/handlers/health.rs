use crate::{models::HealthResponse, services::RecommendationService};
use actix_web::{get, web, HttpResponse};

#[get("/health")]
pub async fn health_check(
    recommendation_service: web::Data<RecommendationService>,
) -> HttpResponse {
    let catalog = recommendation_service.catalog();
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        books: catalog.len(),
        dimension: catalog.dimension(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
