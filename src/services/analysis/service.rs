//! Analysis operations composed from prompts, attachments and the retry gateway.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::attachment::Attachment;
use super::prompts;
use super::AnalysisKind;
use crate::config::RadarConfig;
use crate::error::{RadarResult, ResponseError};
use crate::observability::RadarMetrics;
use crate::resilience::{RetryGateway, RetryObserver, RetryProgress};
use crate::services::content::ContentService;
use crate::simulation::{AppMode, Project};
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

const NO_ANALYSIS: &str = "No analysis generated.";
const NO_COMPARISON: &str = "No comparison generated.";
const NO_RESULTS: &str = "No results found.";
const NO_IMAGE: &str = "No image generated.";

/// Report analysis, comparison, search and image editing over Gemini.
///
/// Every operation builds its request once and sends a clone of it on each
/// attempt. Attempts are scheduled by the [`RetryGateway`]; an empty model
/// answer counts as a failed attempt, except for search.
#[derive(Clone)]
pub struct AnalysisService {
    content: Arc<dyn ContentService>,
    gateway: RetryGateway,
    text_model: String,
    image_model: String,
    temperature: f32,
    metrics: RadarMetrics,
    cancellation: Option<CancellationToken>,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("gateway", &self.gateway)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("temperature", &self.temperature)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// Creates a service using the models and temperature from `config`.
    pub fn new(
        content: Arc<dyn ContentService>,
        gateway: RetryGateway,
        config: &RadarConfig,
        metrics: RadarMetrics,
    ) -> Self {
        Self {
            content,
            gateway,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            temperature: config.analysis_temperature,
            metrics,
            cancellation: None,
        }
    }

    /// A handle whose operations stop as soon as `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self.clone()
        }
    }

    /// Analyze report files under a caller-supplied instruction.
    ///
    /// Files are sent inline before `prompt`. `model` defaults to the
    /// configured text model.
    pub async fn analyze_report(
        &self,
        files: &[Attachment],
        prompt: &str,
        system_instruction: &str,
        model: Option<&str>,
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        let model = model.unwrap_or(&self.text_model);
        let mut parts: Vec<Part> = files.iter().map(Attachment::to_part).collect();
        parts.push(Part::text(prompt));

        let request = GenerateContentRequest::new(vec![Content::user(parts)])
            .with_system_instruction(system_instruction)
            .with_generation_config(GenerationConfig::with_temperature(self.temperature));
        let request = &request;

        self.run(AnalysisKind::Analysis, observer, move || {
            self.generate_text(model, request, NO_ANALYSIS)
        })
        .await
    }

    /// Structured summary of one report.
    pub async fn analyze_document(
        &self,
        file: &Attachment,
        mode: AppMode,
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        self.analyze_report(
            std::slice::from_ref(file),
            &prompts::analyze_prompt(mode),
            &prompts::analyzer_instruction(mode),
            None,
            observer,
        )
        .await
    }

    /// Mentoring feedback on one report.
    pub async fn provide_feedback(
        &self,
        file: &Attachment,
        mode: AppMode,
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        self.analyze_report(
            std::slice::from_ref(file),
            &prompts::feedback_prompt(mode),
            &prompts::feedback_instruction(mode),
            None,
            observer,
        )
        .await
    }

    /// What changed between last month's report and this month's.
    pub async fn compare_reports(
        &self,
        previous: &Attachment,
        current: &Attachment,
        system_instruction: &str,
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        let parts = vec![
            previous.to_part(),
            Part::text(prompts::PREVIOUS_REPORT_MARKER),
            current.to_part(),
            Part::text(prompts::comparison_prompt()),
        ];
        let request = GenerateContentRequest::new(vec![Content::user(parts)])
            .with_system_instruction(system_instruction);
        let request = &request;
        let model = self.text_model.as_str();

        self.run(AnalysisKind::Comparison, observer, move || {
            self.generate_text(model, request, NO_COMPARISON)
        })
        .await
    }

    /// Free-text search over `projects`.
    ///
    /// An empty answer is returned as `"No results found."` rather than
    /// retried.
    pub async fn search_projects(
        &self,
        query: &str,
        projects: &[Project],
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        let projects_json = serde_json::to_string_pretty(projects)?;
        let request = GenerateContentRequest::new(vec![Content::user(vec![Part::text(
            prompts::search_prompt(query, &projects_json),
        )])]);
        let request = &request;
        let model = self.text_model.as_str();

        self.run(AnalysisKind::Search, observer, move || async move {
            let response = self.content.generate(model, request.clone()).await?;
            Ok(response.text().unwrap_or_else(|| NO_RESULTS.to_string()))
        })
        .await
    }

    /// Edit an image with a text instruction and return it as a PNG data URI.
    pub async fn edit_image(
        &self,
        image: &Attachment,
        prompt: &str,
        observer: Option<&dyn RetryObserver>,
    ) -> RadarResult<String> {
        let request = GenerateContentRequest::new(vec![Content {
            role: None,
            parts: vec![image.to_part(), Part::text(prompt)],
        }]);
        let request = &request;
        let model = self.image_model.as_str();

        self.run(AnalysisKind::ImageEdit, observer, move || async move {
            let response = self.content.generate(model, request.clone()).await?;
            if let Some(blob) = response.first_inline_data() {
                return Ok(format!("data:{};base64,{}", mime::IMAGE_PNG, blob.data));
            }
            match response.text() {
                Some(text) => Err(ResponseError::TextInsteadOfImage { text }.into()),
                None => Err(ResponseError::EmptyResult {
                    message: NO_IMAGE.to_string(),
                }
                .into()),
            }
        })
        .await
    }

    async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        empty_message: &'static str,
    ) -> RadarResult<String> {
        let response = self.content.generate(model, request.clone()).await?;
        response.text().ok_or_else(|| {
            ResponseError::EmptyResult {
                message: empty_message.to_string(),
            }
            .into()
        })
    }

    async fn run<T, F, Fut>(
        &self,
        kind: AnalysisKind,
        observer: Option<&dyn RetryObserver>,
        operation: F,
    ) -> RadarResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RadarResult<T>>,
    {
        let name = kind.as_str();
        let metrics = &self.metrics;
        let forward = move |progress: RetryProgress| {
            metrics.record_retry(name, progress.attempt);
            if let Some(observer) = observer {
                observer.on_retry(progress);
            }
        };
        let forward: &dyn RetryObserver = &forward;

        let result = match &self.cancellation {
            Some(token) => {
                self.gateway
                    .execute_cancellable(operation, Some(forward), token)
                    .await
            }
            None => self.gateway.execute(operation, Some(forward)).await,
        };

        self.metrics.record_operation(name, result.is_ok());
        match &result {
            Ok(_) => tracing::debug!(operation = name, "Analysis operation completed"),
            Err(e) if e.is_cancelled() => {
                tracing::info!(operation = name, "Analysis operation cancelled");
            }
            Err(e) => tracing::error!(
                operation = name,
                error = %e,
                "{}",
                kind.failure_message()
            ),
        }
        result
    }
}
