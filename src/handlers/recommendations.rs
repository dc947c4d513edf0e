use crate::{
    config::Config,
    error::ApiError,
    models::{BookRecommendation, RecommendationRequest, RecommendationResponse},
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json, Query},
    HttpResponse,
};
use std::time::Duration;
use tracing::{info_span, warn, Instrument, Span};
use uuid::Uuid;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/recommendations")
            .route(web::post().to(post_recommendations))
            .route(web::get().to(get_recommendations)),
    );
}

/// Recommend books similar to the title named in the JSON body
pub async fn post_recommendations(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    handle(request.into_inner(), recommendation_service, config).await
}

/// Same as the POST route, with parameters in the query string
pub async fn get_recommendations(
    request: Query<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    handle(request.into_inner(), recommendation_service, config).await
}

async fn handle(
    request: RecommendationRequest,
    recommendation_service: web::Data<RecommendationService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("recommendation", %request_id, query = %request.query);
    respond(request_id, request, recommendation_service, config)
        .instrument(span)
        .await
}

async fn respond(
    request_id: Uuid,
    request: RecommendationRequest,
    recommendation_service: web::Data<RecommendationService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let top_n = request.top_n.unwrap_or(config.default_top_n);
    let filters = request.filter_spec();
    let budget_ms = config.request_timeout_ms;

    // Ranking is CPU-bound, so it runs on the blocking pool under the request budget.
    let service = recommendation_service.clone();
    let query = request.query.clone();
    let span = Span::current();
    let task = web::block(move || span.in_scope(|| service.recommend(&query, &filters, top_n)));

    let recommendation = match tokio::time::timeout(Duration::from_millis(budget_ms), task).await
    {
        Ok(outcome) => outcome??,
        Err(_) => {
            warn!(budget_ms, "Recommendation abandoned after exceeding its budget");
            return Err(ApiError::Timeout(budget_ms));
        }
    };

    let catalog = recommendation_service.catalog();
    let recommendations = recommendation
        .books(catalog)
        .map(|(id, book, score)| {
            BookRecommendation::new(id, book, score, config.description_preview_chars)
        })
        .collect();

    Ok(HttpResponse::Ok().json(RecommendationResponse {
        request_id,
        query: request.query,
        matched_title: recommendation.matched_title,
        match_score: recommendation.match_score,
        recommendations,
    }))
}
