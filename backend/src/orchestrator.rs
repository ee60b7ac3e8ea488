use shared::{FinalResponse, HealthResponse, Label};
use std::sync::Arc;
use uuid::Uuid;

use crate::classifier::{Classifier, InferenceError, normalize};
use crate::config::DecisionConfig;
use crate::factcheck::FactCheckClient;

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("No text provided")]
    EmptyInput,
    #[error("{0}")]
    Internal(String),
}

impl From<InferenceError> for DecisionError {
    fn from(err: InferenceError) -> Self {
        DecisionError::Internal(err.to_string())
    }
}

/// Combines the structural classifier with the fact checker.
///
/// The two results are reported side by side and never reconciled. Texts
/// shorter than the configured word threshold skip the classifier and are
/// reported as `Fake` with a fixed confidence.
#[derive(Clone)]
pub struct DecisionOrchestrator {
    classifier: Arc<dyn Classifier>,
    fact_checker: Arc<FactCheckClient>,
    short_text_words: usize,
    short_text_confidence: f32,
}

impl DecisionOrchestrator {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        fact_checker: Arc<FactCheckClient>,
        config: &DecisionConfig,
    ) -> Self {
        Self {
            classifier,
            fact_checker,
            short_text_words: config.short_text_words,
            short_text_confidence: config.short_text_confidence,
        }
    }

    pub async fn decide(
        &self,
        request_id: Uuid,
        text: &str,
    ) -> Result<FinalResponse, DecisionError> {
        if text.trim().is_empty() {
            return Err(DecisionError::EmptyInput);
        }

        let word_count = text.split_whitespace().count();
        if word_count < self.short_text_words {
            log::info!(
                "[{}] Short text ({} words), skipping structural model",
                request_id,
                word_count
            );
            let fact_check = self.fact_checker.check_facts(request_id, text).await;
            return Ok(FinalResponse {
                prediction: Label::Fake,
                confidence: self.short_text_confidence,
                text: text.to_string(),
                fact_check,
            });
        }

        let classifier = Arc::clone(&self.classifier);
        let normalized = normalize(text);
        let classification = tokio::task::spawn_blocking(move || classifier.predict(&normalized));

        let fact_check = self.fact_checker.check_facts(request_id, text);
        let (classified, fact_check) = futures::future::join(classification, fact_check).await;

        let prediction = classified
            .map_err(|e| DecisionError::Internal(format!("Classifier task failed: {}", e)))??;

        Ok(FinalResponse {
            prediction: prediction.label,
            confidence: prediction.confidence,
            text: text.to_string(),
            fact_check,
        })
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ready".to_string(),
            model_loaded: self.classifier.is_loaded(),
            fact_check_ever_succeeded: self.fact_checker.ever_succeeded(),
        }
    }
}
