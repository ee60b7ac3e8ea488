use shared::FactCheckVerdict;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::parser::parse_verdict;
use super::prompt::build_prompt;
use super::retry::{RetryPolicy, RetryState};
use super::{RemoteCallError, TextGenerator};

pub const SERVICE_UNAVAILABLE: &str = "Fact-checking service temporarily unavailable";

/// Fact-checks text through a remote generator, retrying transient failures.
///
/// `check_facts` never returns an error: once the retry budget is spent the
/// caller gets an `INSUFFICIENT_INFORMATION` verdict instead.
pub struct FactCheckClient {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
    ever_succeeded: AtomicBool,
}

impl FactCheckClient {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self {
            generator,
            policy,
            ever_succeeded: AtomicBool::new(false),
        }
    }

    /// True once any provider call has succeeded since startup.
    pub fn ever_succeeded(&self) -> bool {
        self.ever_succeeded.load(Ordering::Acquire)
    }

    pub async fn check_facts(&self, request_id: Uuid, text: &str) -> FactCheckVerdict {
        log::info!("[{}] Fact check started (text length: {})", request_id, text.len());
        let prompt = build_prompt(text);
        let max_attempts = self.policy.max_attempts;

        let mut state = self.policy.initial_state();
        loop {
            state = match state {
                RetryState::Attempting(attempt) => {
                    log::debug!(
                        "[{}] Calling fact-check provider (attempt {}/{})",
                        request_id,
                        attempt,
                        max_attempts
                    );
                    match self.attempt(&prompt).await {
                        Ok(raw) => RetryState::Succeeded(raw),
                        Err(e) => {
                            log::warn!(
                                "[{}] Fact-check provider error (attempt {}/{}): {}",
                                request_id,
                                attempt,
                                max_attempts,
                                e
                            );
                            match self.policy.backoff_after(attempt) {
                                Some(delay) => {
                                    log::info!("[{}] Retrying fact check in {:?}", request_id, delay);
                                    tokio::time::sleep(delay).await;
                                    RetryState::Attempting(attempt + 1)
                                }
                                None => RetryState::ExhaustedFailure,
                            }
                        }
                    }
                }
                RetryState::Succeeded(raw) => {
                    self.ever_succeeded.store(true, Ordering::Release);
                    log::debug!("[{}] Fact-check provider response: {}", request_id, raw);
                    let verdict = parse_verdict(&raw);
                    log::info!("[{}] Fact check completed: {}", request_id, verdict.verdict);
                    return verdict;
                }
                RetryState::ExhaustedFailure => {
                    log::error!(
                        "[{}] Fact check gave up after {} attempts, returning fallback verdict",
                        request_id,
                        max_attempts
                    );
                    return FactCheckVerdict::insufficient(SERVICE_UNAVAILABLE);
                }
            };
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, RemoteCallError> {
        let raw = self.generator.generate(prompt).await?;
        if raw.trim().is_empty() {
            return Err(RemoteCallError::EmptyResponse);
        }
        Ok(raw)
    }
}
