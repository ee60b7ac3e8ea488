use actix_web::{HttpResponse, web};
use log::{error, info, warn};
use serde::Serialize;
use shared::{AnalyzeSummary, PredictRequest};
use uuid::Uuid;

use crate::orchestrator::{DecisionError, DecisionOrchestrator};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// `/api/analyze` keeps the web front end's shape: message first, detail in `error`.
#[derive(Serialize)]
struct AnalyzeErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/api/analyze").route(web::post().to(handle_analyze)));
}

// A body that is not JSON, or has no `text`, counts as empty input.
fn read_text(body: &[u8]) -> String {
    match serde_json::from_slice::<PredictRequest>(body) {
        Ok(request) => request.text,
        Err(e) => {
            warn!("Unreadable request body: {}", e);
            String::new()
        }
    }
}

async fn handle_predict(
    orchestrator: web::Data<DecisionOrchestrator>,
    body: web::Bytes,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let text = read_text(&body);
    info!("[{}] /predict called ({} bytes of text)", request_id, text.len());

    match orchestrator.decide(request_id, &text).await {
        Ok(response) => {
            info!(
                "[{}] prediction={} confidence={:.3} verdict={}",
                request_id, response.prediction, response.confidence, response.fact_check.verdict
            );
            HttpResponse::Ok().json(response)
        }
        Err(DecisionError::EmptyInput) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("No text provided"))
        }
        Err(e) => {
            error!("[{}] Prediction failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

async fn handle_analyze(
    orchestrator: web::Data<DecisionOrchestrator>,
    body: web::Bytes,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let text = read_text(&body);
    info!("[{}] /api/analyze called ({} bytes of text)", request_id, text.len());

    match orchestrator.decide(request_id, &text).await {
        Ok(response) => HttpResponse::Ok().json(AnalyzeSummary::from(response)),
        Err(DecisionError::EmptyInput) => HttpResponse::BadRequest().json(AnalyzeErrorResponse {
            message: "No text provided".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("[{}] Analysis failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(AnalyzeErrorResponse {
                message: "ML service unavailable".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

async fn health(orchestrator: web::Data<DecisionOrchestrator>) -> HttpResponse {
    HttpResponse::Ok().json(orchestrator.health())
}
