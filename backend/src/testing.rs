//! Test doubles for the classifier and the fact-check provider.

use async_trait::async_trait;
use shared::Label;
use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio::time::Instant;

use crate::classifier::{Classifier, InferenceError, PredictionResult};
use crate::factcheck::{RemoteCallError, TextGenerator};

/// Replays a fixed sequence of provider outcomes, then fails forever.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, RemoteCallError>>>,
    calls: Mutex<Vec<(Instant, String)>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, RemoteCallError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    /// Time elapsed between consecutive calls.
    pub fn gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|pair| pair[1].0 - pair[0].0).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, RemoteCallError> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), prompt.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteCallError::Malformed("connection reset".to_string())))
    }
}

pub struct StaticClassifier {
    pub result: PredictionResult,
    pub seen: Mutex<Vec<String>>,
}

impl StaticClassifier {
    pub fn new(label: Label, confidence: f32) -> Self {
        Self {
            result: PredictionResult { label, confidence },
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Classifier for StaticClassifier {
    fn predict(&self, normalized_text: &str) -> Result<PredictionResult, InferenceError> {
        self.seen.lock().unwrap().push(normalized_text.to_string());
        Ok(self.result)
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _normalized_text: &str) -> Result<PredictionResult, InferenceError> {
        Err(InferenceError::ModelState("weights were never loaded".to_string()))
    }

    fn is_loaded(&self) -> bool {
        false
    }
}

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Records every log line so tests can inspect what a request wrote.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

pub fn capture_logs() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Debug);
        }
    });
}

/// Captured lines containing `needle`, e.g. a request id.
pub fn logged_lines(needle: &str) -> Vec<String> {
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(needle))
        .cloned()
        .collect()
}
