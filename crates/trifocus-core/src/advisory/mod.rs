//! Advisory client: daily plans and task breakdowns from an external
//! text-generation service.
//!
//! Every operation makes at most one request and always returns something
//! renderable. Failures are tagged, never hidden in the text: see
//! [`AdvisoryOutcome`].

pub mod backend;
pub mod credentials;
pub mod gemini;
pub mod prompt;

pub use backend::{GenerationBackend, GenerationRequest, ResponseSchema};
pub use gemini::GeminiBackend;

use crate::error::AdvisoryError;
use crate::storage::AdvisoryConfig;
use crate::task::{JobContext, Task};

/// Shown when every task is done; no request is made.
pub const NO_PENDING_TASKS_MESSAGE: &str = "You have no pending tasks! Enjoy your rest.";
/// Shown when no API credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API key not configured. Set TRIFOCUS_API_KEY or run `trifocus auth login`.";
/// Shown when the service could not be reached or returned an error.
pub const ADVICE_FAILED_MESSAGE: &str =
    "Could not connect to the advisory service. Check your connection or try again later.";
/// Shown when the service answered without any advice.
pub const ADVICE_EMPTY_MESSAGE: &str = "Could not generate advice right now.";
/// Single-entry step list returned when no credential is configured.
pub const BREAKDOWN_MISSING_CREDENTIAL_STEP: &str = "API key missing";
/// Single-entry step list returned when the breakdown failed.
pub const BREAKDOWN_FAILED_STEP: &str = "Could not break down the task.";

/// Result of an advisory operation.
///
/// All variants carry a value the caller can render; only `Ready` carries
/// content produced by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryOutcome<T> {
    /// The service answered.
    Ready(T),
    /// Nothing to advise on; the service was not contacted.
    NothingPending(T),
    /// The service could not help; `fallback` is safe to display.
    Unavailable { reason: AdvisoryError, fallback: T },
}

impl<T> AdvisoryOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, AdvisoryOutcome::Ready(_))
    }

    pub fn reason(&self) -> Option<&AdvisoryError> {
        match self {
            AdvisoryOutcome::Unavailable { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The value to render, whatever the variant.
    pub fn value(&self) -> &T {
        match self {
            AdvisoryOutcome::Ready(v) | AdvisoryOutcome::NothingPending(v) => v,
            AdvisoryOutcome::Unavailable { fallback, .. } => fallback,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            AdvisoryOutcome::Ready(v) | AdvisoryOutcome::NothingPending(v) => v,
            AdvisoryOutcome::Unavailable { fallback, .. } => fallback,
        }
    }
}

/// Client for the advisory service.
///
/// Stateless between calls: nothing is cached, and concurrent calls are
/// independent of each other.
pub struct AdvisoryClient<B> {
    backend: B,
    api_key: Option<String>,
    model: String,
    language: String,
}

impl<B: GenerationBackend> AdvisoryClient<B> {
    /// Client with the default model and answer language.
    ///
    /// `api_key` of `None` (or blank) puts the client in the unconfigured
    /// state: every operation returns its fallback without a request.
    pub fn new(backend: B, api_key: Option<String>) -> Self {
        let defaults = AdvisoryConfig::default();
        Self {
            backend,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: defaults.model,
            language: defaults.language,
        }
    }

    /// Client using the model and language from `config`.
    pub fn from_config(backend: B, api_key: Option<String>, config: &AdvisoryConfig) -> Self {
        Self::new(backend, api_key)
            .with_model(config.model.clone())
            .with_language(config.language.clone())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask for a plan of attack over the incomplete tasks in `tasks`.
    pub async fn get_prioritization_advice(&self, tasks: &[Task]) -> AdvisoryOutcome<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return unavailable(AdvisoryError::MissingCredential, MISSING_CREDENTIAL_MESSAGE.into());
        };

        let pending: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
        if pending.is_empty() {
            return AdvisoryOutcome::NothingPending(NO_PENDING_TASKS_MESSAGE.into());
        }

        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompt::advice_prompt(&pending, &self.language),
            response_schema: None,
        };

        match self.backend.generate(api_key, &request).await {
            Ok(Some(text)) if !text.trim().is_empty() => AdvisoryOutcome::Ready(text),
            Ok(_) => unavailable(AdvisoryError::EmptyResponse, ADVICE_EMPTY_MESSAGE.into()),
            Err(reason) => unavailable(reason, ADVICE_FAILED_MESSAGE.into()),
        }
    }

    /// Ask for 3 to 5 actionable sub-steps of one task.
    pub async fn breakdown_task(&self, title: &str, job: JobContext) -> AdvisoryOutcome<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return unavailable(
                AdvisoryError::MissingCredential,
                vec![BREAKDOWN_MISSING_CREDENTIAL_STEP.to_string()],
            );
        };

        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompt::breakdown_prompt(title, job, &self.language),
            response_schema: Some(ResponseSchema::StringList),
        };

        match self.backend.generate(api_key, &request).await {
            Ok(Some(text)) => match prompt::parse_step_list(&text) {
                Ok(steps) => AdvisoryOutcome::Ready(steps),
                Err(reason) => unavailable(reason, vec![BREAKDOWN_FAILED_STEP.to_string()]),
            },
            Ok(None) => unavailable(AdvisoryError::EmptyResponse, Vec::new()),
            Err(reason) => unavailable(reason, vec![BREAKDOWN_FAILED_STEP.to_string()]),
        }
    }
}

fn unavailable<T>(reason: AdvisoryError, fallback: T) -> AdvisoryOutcome<T> {
    tracing::warn!("advisory service unavailable: {reason}");
    AdvisoryOutcome::Unavailable { reason, fallback }
}
