use crate::{config::Config, error::Result, routes::api_routes, services::RecommendationService};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;

pub struct Application {
    config: Config,
    recommendation_service: RecommendationService,
}

impl Application {
    pub fn new(config: &Config, recommendation_service: RecommendationService) -> Self {
        Self {
            config: config.clone(),
            recommendation_service,
        }
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server on an already bound listener, e.g. an ephemeral port in tests
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let recommendation_service = web::Data::new(self.recommendation_service.clone());
        let config = web::Data::new(self.config.clone());

        info!(
            "Serving {} books ({} dimensions)",
            recommendation_service.catalog().len(),
            recommendation_service.catalog().dimension()
        );

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .app_data(config.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
