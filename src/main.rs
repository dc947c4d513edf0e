use anyhow::Context;
use book_recommender::{
    app::Application,
    catalog::{Catalog, FileCatalogLoader},
    config::Config,
    services::RecommendationService,
};
use log::info;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_recommender=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loading configuration...");
    let config = Config::load().context("Failed to load configuration")?;

    info!(
        "Loading catalog from {} and {}",
        config.catalog_path.display(),
        config.embeddings_path.display()
    );
    let loader = FileCatalogLoader::new(&config.catalog_path, &config.embeddings_path);
    let catalog = Catalog::load(&loader).context("Failed to load book catalog")?;

    let recommendation_service =
        RecommendationService::with_defaults(Arc::new(catalog), config.recommender_settings());

    let application = Application::new(&config, recommendation_service);
    application.run().await.context("Server terminated with an error")
}
