//! Qualify LLM Provider Layer
//!
//! Pluggable text-generation providers behind one async interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, rule-based mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use qualify_llm::{LlmProvider, MockProvider};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! let mut provider = MockProvider::new("{}");
//! provider.add_response("Request item: risk_assessment", r#"{"payment_risk": 0.1}"#);
//!
//! let reply = rt.block_on(provider.generate("...\nRequest item: risk_assessment\n...")).unwrap();
//! assert_eq!(reply, r#"{"payment_risk": 0.1}"#);
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A text-generation backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate free text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Generate output constrained to a JSON schema
    ///
    /// `schema` is a JSON Schema document. Providers without structured output
    /// support may ignore it; callers must still validate the reply.
    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, LlmError>;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        (**self).generate_structured(prompt, schema).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
    Delayed(String, Duration),
}

#[derive(Debug, Clone)]
struct MockRule {
    needle: String,
    reply: MockReply,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen by substring: the first registered rule whose needle
/// occurs in the prompt wins, otherwise the default response is returned. No
/// network calls are made. Clones share rules and the call counter.
///
/// # Examples
///
/// ```
/// use qualify_llm::{LlmProvider, MockProvider};
///
/// let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
///
/// let mut provider = MockProvider::default();
/// provider.add_response("pain_intensity", "response1");
/// provider.add_error("financial_capacity");
///
/// assert_eq!(rt.block_on(provider.generate("item pain_intensity")).unwrap(), "response1");
/// assert!(rt.block_on(provider.generate("item financial_capacity")).is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<MockRule>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reply with `response` to any prompt containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.push_rule(needle.into(), MockReply::Text(response.into()));
    }

    /// Fail any prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.push_rule(needle.into(), MockReply::Error);
    }

    /// Reply with `response` after `delay` to any prompt containing `needle`
    pub fn add_delayed_response(
        &mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
        delay: Duration,
    ) {
        self.push_rule(needle.into(), MockReply::Delayed(response.into(), delay));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn push_rule(&mut self, needle: String, reply: MockReply) {
        self.lock_rules().push(MockRule { needle, reply });
    }

    fn lock_rules(&self) -> MutexGuard<'_, Vec<MockRule>> {
        self.rules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply_for(&self, prompt: &str) -> MockReply {
        self.lock_rules()
            .iter()
            .find(|rule| prompt.contains(&rule.needle))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.reply_for(prompt) {
            MockReply::Text(response) => Ok(response),
            MockReply::Error => Err(LlmError::Other("Mock error".to_string())),
            MockReply::Delayed(response, delay) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
        }
    }

    async fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, LlmError> {
        self.generate(prompt).await
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
