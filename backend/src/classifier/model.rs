use ndarray::Array1;
use serde::Deserialize;
use shared::Label;
use std::path::Path;
use std::sync::Arc;

use super::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use super::{Classifier, PredictionResult};

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed model artifact: {0}")]
    Artifact(#[from] serde_json::Error),
    #[error("Inconsistent model state: {0}")]
    ModelState(String),
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    vectorizer: VectorizerArtifact,
    classifier: LogisticArtifact,
}

#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    coefficients: Vec<f64>,
    intercept: f64,
}

/// TF-IDF features scored by a binary logistic regression.
/// Class 0 is `Fake`, class 1 is `Real`.
#[derive(Clone)]
pub struct StructuralModel {
    vectorizer: Arc<TfidfVectorizer>,
    coefficients: Arc<Array1<f64>>,
    intercept: f64,
}

impl StructuralModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| InferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded structural model from {} ({} terms, {} columns)",
            path.display(),
            model.vectorizer.vocabulary_size(),
            model.vectorizer.width()
        );
        Ok(model)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, InferenceError> {
        let artifact: ModelArtifact = serde_json::from_str(contents)?;
        let vectorizer = TfidfVectorizer::from_artifact(artifact.vectorizer)?;

        if artifact.classifier.coefficients.len() != vectorizer.width() {
            return Err(InferenceError::ModelState(format!(
                "classifier expects {} features but vectorizer produces {}",
                artifact.classifier.coefficients.len(),
                vectorizer.width()
            )));
        }

        Ok(Self {
            vectorizer: Arc::new(vectorizer),
            coefficients: Arc::new(Array1::from(artifact.classifier.coefficients)),
            intercept: artifact.classifier.intercept,
        })
    }

    /// Class probabilities as `[fake, real]`.
    pub fn predict_proba(&self, normalized_text: &str) -> Result<[f64; 2], InferenceError> {
        let features = self.vectorizer.transform(normalized_text);
        if features.is_empty() {
            log::debug!("No known terms in input, scoring on intercept only");
        }
        let score = features.dot(&self.coefficients) + self.intercept;
        if !score.is_finite() {
            return Err(InferenceError::ModelState(format!(
                "decision score is not finite ({})",
                score
            )));
        }
        let real = 1.0 / (1.0 + (-score).exp());
        Ok([1.0 - real, real])
    }

    pub fn calculate_result(probabilities: &[f64; 2]) -> PredictionResult {
        let [fake, real] = *probabilities;
        if real > fake {
            PredictionResult {
                label: Label::Real,
                confidence: real as f32,
            }
        } else {
            PredictionResult {
                label: Label::Fake,
                confidence: fake as f32,
            }
        }
    }
}

impl Classifier for StructuralModel {
    fn predict(&self, normalized_text: &str) -> Result<PredictionResult, InferenceError> {
        let probabilities = self.predict_proba(normalized_text)?;
        Ok(Self::calculate_result(&probabilities))
    }

    fn is_loaded(&self) -> bool {
        self.vectorizer.vocabulary_size() > 0
    }
}
