//! Endpoint paths for the Gemini API.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Path for a specific model, e.g. `/models/gemini-2.5-flash`.
pub fn model(name: &str) -> String {
    format!("{}/{}", MODELS, name.trim_start_matches("models/"))
}

/// Path for the generateContent endpoint of `model`.
///
/// ```
/// use project_radar::transport::endpoints;
///
/// let path = endpoints::generate_content("gemini-2.5-flash");
/// assert_eq!(path, "/models/gemini-2.5-flash:generateContent");
/// ```
pub fn generate_content(model: &str) -> String {
    format!("{}:generateContent", self::model(model))
}
