pub mod model;
pub mod normalize;
pub mod vectorizer;

use shared::Label;

pub use model::{InferenceError, StructuralModel};
pub use normalize::normalize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: Label,
    /// Highest class probability, within [0, 1].
    pub confidence: f32,
}

/// Structural (style-based) classifier over normalized text.
///
/// Implementations are read-only after load and shared across requests.
pub trait Classifier: Send + Sync {
    fn predict(&self, normalized_text: &str) -> Result<PredictionResult, InferenceError>;

    fn is_loaded(&self) -> bool {
        true
    }
}
