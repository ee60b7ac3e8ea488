pub mod client;
pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod retry;

use async_trait::async_trait;

pub use client::FactCheckClient;
pub use gemini::GeminiService;
pub use retry::RetryPolicy;

/// Transient failure of a single provider call. Always retried.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed provider response: {0}")]
    Malformed(String),
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Remote text-generation capability used for fact checking.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RemoteCallError>;
}
