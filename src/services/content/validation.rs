//! Validation of `generateContent` requests before they are sent.

use crate::error::{RadarError, RadarResult, RequestError, ValidationDetail};
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

fn detail(field: String, description: &str) -> ValidationDetail {
    ValidationDetail {
        field,
        description: description.to_string(),
    }
}

/// Validates a request, reporting every problem found at once.
pub fn validate_generate_request(request: &GenerateContentRequest) -> RadarResult<()> {
    let mut details = Vec::new();

    if request.contents.is_empty() {
        details.push(detail("contents".to_string(), "Contents array cannot be empty"));
    }

    for (idx, content) in request.contents.iter().enumerate() {
        check_content(content, &format!("contents[{idx}]"), &mut details);
    }

    if let Some(instruction) = &request.system_instruction {
        check_content(instruction, "system_instruction", &mut details);
    }

    if let Some(config) = &request.generation_config {
        check_generation_config(config, &mut details);
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(RadarError::Request(RequestError::ValidationError {
            message: "Invalid generate content request".to_string(),
            details,
        }))
    }
}

fn check_content(content: &Content, prefix: &str, details: &mut Vec<ValidationDetail>) {
    if content.parts.is_empty() {
        details.push(detail(format!("{prefix}.parts"), "Content must have at least one part"));
    }

    for (idx, part) in content.parts.iter().enumerate() {
        let field = format!("{prefix}.parts[{idx}]");
        match part {
            Part::Text { text } if text.is_empty() => {
                details.push(detail(format!("{field}.text"), "Text cannot be empty"));
            }
            Part::Text { .. } => {}
            Part::InlineData { inline_data } => {
                if inline_data.mime_type.is_empty() {
                    details.push(detail(format!("{field}.inline_data.mime_type"), "MIME type is required"));
                }
                if inline_data.data.is_empty() {
                    details.push(detail(format!("{field}.inline_data.data"), "Data cannot be empty"));
                }
            }
            Part::Other(_) => {
                details.push(detail(field, "Only text and inline data parts can be sent"));
            }
        }
    }
}

fn check_generation_config(config: &GenerationConfig, details: &mut Vec<ValidationDetail>) {
    if let Some(temperature) = config.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            details.push(detail(
                "generation_config.temperature".to_string(),
                "Temperature must be between 0.0 and 2.0",
            ));
        }
    }

    if let Some(top_p) = config.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            details.push(detail("generation_config.top_p".to_string(), "Top-p must be between 0.0 and 1.0"));
        }
    }

    if let Some(top_k) = config.top_k {
        if top_k < 1 {
            details.push(detail("generation_config.top_k".to_string(), "Top-k must be at least 1"));
        }
    }

    if let Some(max_tokens) = config.max_output_tokens {
        if max_tokens < 1 {
            details.push(detail(
                "generation_config.max_output_tokens".to_string(),
                "Max output tokens must be at least 1",
            ));
        }
    }
}
