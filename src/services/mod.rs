//! Services built on the Gemini API.

pub mod analysis;
pub mod content;

pub use analysis::{AnalysisKind, AnalysisService, Attachment};
pub use content::{ContentService, ContentServiceImpl};
