//! Report analysis on top of the content service.
//!
//! Each operation runs through the [`RetryGateway`](crate::resilience::RetryGateway),
//! so callers see either the model's answer or the last failure after the
//! delay table is exhausted.

mod attachment;
pub mod prompts;
mod service;

pub use attachment::Attachment;
pub use service::AnalysisService;

/// The analysis operations, as far as failure reporting is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    /// Report analysis and feedback.
    Analysis,
    /// Month-over-month report comparison.
    Comparison,
    /// Project search.
    Search,
    /// Image editing.
    ImageEdit,
}

impl AnalysisKind {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Analysis => "analysis",
            AnalysisKind::Comparison => "comparison",
            AnalysisKind::Search => "search",
            AnalysisKind::ImageEdit => "image_edit",
        }
    }

    /// Message shown to the user when the operation ultimately fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            AnalysisKind::Analysis => "Analysis failed after multiple attempts",
            AnalysisKind::Comparison => "Error processing recall after multiple attempts.",
            AnalysisKind::Search => "Search failed.",
            AnalysisKind::ImageEdit => {
                "Failed to edit image. Try a simpler prompt or different image."
            }
        }
    }
}
