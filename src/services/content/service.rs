//! HTTP-backed content service.

use std::sync::Arc;
use std::time::Instant;
use async_trait::async_trait;
use serde_json::json;

use super::ContentService;
use super::validation::validate_generate_request;
use crate::auth::AuthManager;
use crate::config::RadarConfig;
use crate::error::{ContentError, RadarError, RadarResult, RequestError, SafetyRatingInfo};
use crate::observability::{Logger, RadarMetrics, SpanStatus, Tracer};
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{
    BlockReason, FinishReason, GenerateContentRequest, GenerateContentResponse, SafetyRating,
};

/// Content service over an [`HttpTransport`].
pub struct ContentServiceImpl {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Arc<dyn Logger>,
    tracer: Arc<dyn Tracer>,
    metrics: RadarMetrics,
}

impl ContentServiceImpl {
    /// Create a new content service.
    pub fn new(
        config: &RadarConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: &dyn AuthManager,
        logger: Arc<dyn Logger>,
        tracer: Arc<dyn Tracer>,
        metrics: RadarMetrics,
    ) -> Self {
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager.clone_box(),
        );

        Self {
            transport,
            request_builder,
            logger,
            tracer,
            metrics,
        }
    }

    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        start: Instant,
    ) -> RadarResult<GenerateContentResponse> {
        if model.trim().is_empty() {
            return Err(RequestError::InvalidParameter {
                parameter: "model".to_string(),
                message: "model name must not be empty".to_string(),
            }
            .into());
        }
        validate_generate_request(request)?;

        let http_request = self.request_builder.build_request(
            HttpMethod::Post,
            &endpoints::generate_content(model),
            Some(request),
        )?;

        let http_response = self.transport.send(http_request).await.map_err(|e| {
            let error = RadarError::from(e);
            self.logger.error("Network error during content generation", json!({
                "error": error.to_string(),
                "model": model,
            }));
            error
        })?;

        let status = http_response.status;
        let parsed = ResponseParser::parse_response::<GenerateContentResponse>(http_response);
        self.metrics.record_request(model, status, elapsed_ms(start));
        let response = parsed?;

        if let Err(e) = check_safety_blocks(&response) {
            if let RadarError::Content(ContentError::SafetyBlocked { reason, .. }) = &e {
                self.metrics.record_safety_block(model, reason);
            }
            self.logger.warn("Content generation blocked", json!({
                "error": e.to_string(),
                "model": model,
            }));
            return Err(e);
        }

        Ok(response)
    }
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RadarError> {
        let mut span = self.tracer.start_span("radar.content.generate");
        span.set_attribute("model", model);
        span.set_attribute("service", "content");

        let start = Instant::now();
        self.logger.debug("Starting content generation", json!({
            "model": model,
            "contents_count": request.contents.len(),
            "has_system_instruction": request.system_instruction.is_some(),
            "has_generation_config": request.generation_config.is_some(),
        }));

        let result = self.send(model, &request, start).await;

        match &result {
            Ok(response) => {
                let candidates = response.candidates.as_ref().map_or(0, Vec::len);
                match &response.usage_metadata {
                    Some(usage) => {
                        let completion = usage.candidates_token_count.unwrap_or(0);
                        self.metrics.record_tokens(model, usage.prompt_token_count, completion);
                        self.logger.info("Content generation completed", json!({
                            "model": model,
                            "duration_ms": elapsed_ms(start),
                            "prompt_tokens": usage.prompt_token_count,
                            "completion_tokens": completion,
                            "total_tokens": usage.total_token_count,
                            "candidates": candidates,
                        }));
                    }
                    None => self.logger.info("Content generation completed", json!({
                        "model": model,
                        "duration_ms": elapsed_ms(start),
                        "candidates": candidates,
                    })),
                }
                span.set_status(SpanStatus::Ok);
            }
            Err(e) => span.set_status(SpanStatus::Error(e.to_string())),
        }
        span.end();

        result
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn rating_info(ratings: Option<&Vec<SafetyRating>>) -> Vec<SafetyRatingInfo> {
    ratings
        .map(|ratings| {
            ratings
                .iter()
                .map(|r| SafetyRatingInfo {
                    category: format!("{:?}", r.category),
                    probability: format!("{:?}", r.probability),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn primary_reason(ratings: &[SafetyRatingInfo]) -> String {
    ratings
        .first()
        .map_or_else(
            || "Safety (unspecified)".to_string(),
            |r| format!("Safety: {} ({})", r.category, r.probability),
        )
}

/// Fails if the prompt or any candidate was blocked.
fn check_safety_blocks(response: &GenerateContentResponse) -> RadarResult<()> {
    if let Some(feedback) = &response.prompt_feedback {
        match feedback.block_reason {
            Some(BlockReason::Safety) => {
                let safety_ratings = rating_info(feedback.safety_ratings.as_ref());
                tracing::warn!(safety_ratings = ?safety_ratings, "Prompt blocked for safety");
                return Err(ContentError::SafetyBlocked {
                    reason: primary_reason(&safety_ratings),
                    safety_ratings,
                }
                .into());
            }
            Some(BlockReason::Blocklist | BlockReason::ProhibitedContent) => {
                tracing::warn!("Prompt blocked for prohibited content");
                return Err(ContentError::ProhibitedContent.into());
            }
            Some(BlockReason::Other) => {
                tracing::debug!("Prompt blocked for a non-safety reason");
            }
            None => {}
        }
    }

    for (index, candidate) in response.candidates.iter().flatten().enumerate() {
        match candidate.finish_reason {
            Some(FinishReason::Safety) => {
                let safety_ratings = rating_info(candidate.safety_ratings.as_ref());
                tracing::warn!(candidate_index = index, "Candidate blocked for safety");
                return Err(ContentError::SafetyBlocked {
                    reason: primary_reason(&safety_ratings),
                    safety_ratings,
                }
                .into());
            }
            Some(FinishReason::Recitation) => {
                tracing::warn!(candidate_index = index, "Candidate blocked for recitation");
                return Err(ContentError::RecitationBlocked {
                    safety_ratings: rating_info(candidate.safety_ratings.as_ref()),
                }
                .into());
            }
            Some(FinishReason::ProhibitedContent | FinishReason::Blocklist) => {
                tracing::warn!(candidate_index = index, "Candidate blocked for prohibited content");
                return Err(ContentError::ProhibitedContent.into());
            }
            _ => {}
        }
    }

    Ok(())
}
