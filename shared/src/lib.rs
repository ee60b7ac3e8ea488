use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

/// Label produced by the structural classifier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum Label {
    Real,
    Fake,
}

/// Fact-check conclusion. Serialized with the tokens the provider is asked to emit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Verdict {
    True,
    False,
    InsufficientInformation,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FactCheckVerdict {
    pub verdict: Verdict,
    pub reason: String,
}

impl FactCheckVerdict {
    pub fn new(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            reason: reason.into(),
        }
    }

    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self::new(Verdict::InsufficientInformation, reason)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalResponse {
    pub prediction: Label,
    pub confidence: f32,
    pub text: String,
    pub fact_check: FactCheckVerdict,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    #[serde(rename = "factCheckEverSucceeded")]
    pub fact_check_ever_succeeded: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Structure {
    #[serde(rename = "Well-structured")]
    WellStructured,
    #[serde(rename = "Poorly-structured")]
    PoorlyStructured,
}

impl From<Label> for Structure {
    fn from(label: Label) -> Self {
        match label {
            Label::Real => Structure::WellStructured,
            Label::Fake => Structure::PoorlyStructured,
        }
    }
}

/// Presentation summary consumed by the web front end.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyzeSummary {
    pub structure: Structure,
    /// Whole percent, 0..=100.
    pub confidence: u32,
    #[serde(rename = "factCheck")]
    pub fact_check: FactCheckVerdict,
}

impl From<FinalResponse> for AnalyzeSummary {
    fn from(response: FinalResponse) -> Self {
        let percent = (response.confidence.clamp(0.0, 1.0) * 100.0).round() as u32;
        Self {
            structure: response.prediction.into(),
            confidence: percent,
            fact_check: response.fact_check,
        }
    }
}
