mod classifier;
mod config;
mod factcheck;
mod orchestrator;
mod routes;
#[cfg(test)]
mod testing;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use classifier::StructuralModel;
use config::ServiceConfig;
use factcheck::{FactCheckClient, GeminiService, RetryPolicy};
use orchestrator::DecisionOrchestrator;
use routes::configure_routes;
use std::env;
use std::sync::Arc;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    log::error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    }

    let config = ServiceConfig::load().map_err(|e| startup_error("Invalid configuration", e))?;
    let api_key = config::require_api_key(|key| env::var(key).ok())
        .map_err(|e| startup_error("Missing fact-check credential", e))?;

    let model = StructuralModel::load(&config.model.path)
        .map_err(|e| startup_error("Model loading failed", e))?;

    let generator = GeminiService::new(api_key, &config.fact_check)
        .map_err(|e| startup_error("Invalid fact-check endpoint", e))?;
    log::info!(
        "Fact checking via {} (model {}, up to {} attempts)",
        generator.endpoint(),
        config.fact_check.model,
        config.fact_check.retry.max_attempts
    );
    let fact_checker = FactCheckClient::new(
        Arc::new(generator),
        RetryPolicy::from(&config.fact_check.retry),
    );

    let orchestrator =
        DecisionOrchestrator::new(Arc::new(model), Arc::new(fact_checker), &config.decision);

    let bind_address = format!("0.0.0.0:{}", config.server.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(orchestrator.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
