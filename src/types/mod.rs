//! Wire types for the Gemini `generateContent` API.

pub mod content;
pub mod generation;
pub mod safety;

pub use content::{Blob, Content, Part, Role};
pub use generation::{
    BlockReason, Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, PromptFeedback, UsageMetadata,
};
pub use safety::{HarmCategory, HarmProbability, SafetyRating};
