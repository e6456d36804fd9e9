//! Single-shot content generation against the Gemini API.

mod service;
mod validation;

use async_trait::async_trait;
use crate::error::RadarError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

pub use service::ContentServiceImpl;
pub use validation::validate_generate_request;

/// Sends one `generateContent` request. Never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Generate content with `model`.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RadarError>;
}
