//! Request and response types for `generateContent`.

use serde::{Deserialize, Serialize};

use super::content::{Blob, Content};
use super::safety::SafetyRating;

/// Configuration for content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// The temperature for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// The nucleus sampling probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// The top-k sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// The maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    /// The MIME type of the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    /// A config that only sets the temperature.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Default::default()
        }
    }
}

/// The reason why content generation finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stop point.
    Stop,
    /// Output token limit reached.
    MaxTokens,
    /// Stopped by safety filters.
    Safety,
    /// Stopped for reciting training data.
    Recitation,
    /// Matched a blocklisted term.
    Blocklist,
    /// Prohibited content detected.
    ProhibitedContent,
    /// Sensitive personal information detected.
    Spii,
    /// Any reason not listed above.
    #[serde(other)]
    Other,
}

/// Metadata about token usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: i32,
    /// Number of tokens in the candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<i32>,
    /// Total number of tokens.
    #[serde(default)]
    pub total_token_count: i32,
}

/// A candidate response from the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate. Missing when the candidate was blocked.
    #[serde(default)]
    pub content: Content,
    /// The reason generation finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Safety ratings for the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
    /// The index of this candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Request to generate content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The content to send to the model.
    pub contents: Vec<Content>,
    /// Optional system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn with no system instruction or config.
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::instruction(instruction));
        self
    }

    /// Sets the generation config.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// Feedback on why the prompt was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// The reason the prompt was blocked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
    /// Safety ratings for the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<SafetyRating>>,
}

/// Reason why the prompt was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    /// Blocked by safety filters.
    Safety,
    /// Matched a blocklisted term.
    Blocklist,
    /// Prohibited content detected.
    ProhibitedContent,
    /// Any other reason.
    #[serde(other)]
    Other,
}

/// Response from content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// The candidate responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback about the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Usage metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// The version of the model used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// The first candidate, if any.
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }

    /// Concatenated text of the first candidate's text parts.
    ///
    /// Returns `None` when there is no text or the text is empty.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_candidate()?
            .content
            .parts
            .iter()
            .filter_map(|part| part.as_text())
            .collect();

        (!text.is_empty()).then_some(text)
    }

    /// The first inline data part of the first candidate.
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.first_candidate()?
            .content
            .parts
            .iter()
            .find_map(|part| part.as_inline_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Part;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest::new(vec![Content::user(vec![Part::text("hi")])])
            .with_system_instruction("You are a reviewer.");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "systemInstruction": {"parts": [{"text": "You are a reviewer."}]}
            })
        );

        let with_config = request.with_generation_config(GenerationConfig::with_temperature(0.4));
        let body = serde_json::to_string(&with_config).unwrap();
        assert!(body.contains(r#""generationConfig":{"temperature":0.4}"#));
    }

    #[test]
    fn test_text_concatenates_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Sprint "}, {"text": "on track"}]}, "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Sprint on track"));
    }

    #[test]
    fn test_text_is_none_for_empty_or_missing() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": ""}]}}]
        }))
        .unwrap();
        assert_eq!(empty.text(), None);
        assert_eq!(GenerateContentResponse::default().text(), None);
    }

    #[test]
    fn test_first_inline_data_skips_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is the edit"},
                {"inlineData": {"mimeType": "image/png", "data": "iVBOR"}}
            ]}}]
        }))
        .unwrap();

        assert_eq!(response.first_inline_data().unwrap().data, "iVBOR");
    }

    #[test]
    fn test_blocked_candidate_without_content() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "IMAGE_SAFETY"}]
        }))
        .unwrap();

        let candidate = response.first_candidate().unwrap();
        assert_eq!(candidate.finish_reason, Some(FinishReason::Other));
        assert!(candidate.content.parts.is_empty());
    }
}
