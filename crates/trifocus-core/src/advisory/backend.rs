use async_trait::async_trait;

use crate::error::AdvisoryError;

/// Structured-output shape requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    /// A JSON array of strings.
    StringList,
}

/// One text-generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub response_schema: Option<ResponseSchema>,
}

/// Transport to an external text-generation service.
///
/// Implementations make exactly one attempt per call. `Ok(None)` means the
/// service answered but produced no text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, AdvisoryError>;
}

#[async_trait]
impl<B: GenerationBackend + ?Sized> GenerationBackend for Box<B> {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, AdvisoryError> {
        (**self).generate(api_key, request).await
    }
}
