use async_trait::async_trait;

use crate::error::PlanError;
use crate::prompt::RenderedPrompt;

/// Narrow seam to the hosted model: send one prompt, get the completion text.
///
/// Implementations return [`PlanError::Upstream`] for a failed call and
/// [`PlanError::EmptyResult`] when the call succeeded but carried no text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: RenderedPrompt) -> Result<String, PlanError>;
}
