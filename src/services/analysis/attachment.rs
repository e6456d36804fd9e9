//! Files sent inline alongside a prompt.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;

use crate::error::{RadarError, RequestError};
use crate::types::Part;

/// A document or image uploaded with an analysis request.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    mime_type: String,
    data: Bytes,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl Attachment {
    /// Creates an attachment from raw bytes.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Reads a file, guessing its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RadarError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            RadarError::Request(RequestError::AttachmentUnreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        tracing::debug!(name = %name, mime_type = %mime_type, size = data.len(), "Attachment loaded");
        Ok(Self::new(name, mime_type, data))
    }

    /// File name shown to the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type sent with the inline data.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw file content.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Inline data part with the content base64-encoded.
    pub fn to_part(&self) -> Part {
        Part::inline_data(self.mime_type.clone(), BASE64.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_to_part_encodes_base64() {
        let attachment = Attachment::new("notes.txt", "text/plain", &b"hello"[..]);
        let part = attachment.to_part();
        let blob = part.as_inline_data().unwrap();

        assert_eq!(blob.mime_type, "text/plain");
        assert_eq!(blob.data, "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let attachment = Attachment::from_path(file.path()).await.unwrap();
        assert_eq!(attachment.mime_type(), "application/pdf");
        assert_eq!(attachment.data().as_ref(), b"%PDF-1.4");
        assert!(attachment.name().ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let file = tempfile::Builder::new().suffix(".radar").tempfile().unwrap();
        let attachment = Attachment::from_path(file.path()).await.unwrap();
        assert_eq!(attachment.mime_type(), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Attachment::from_path("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(
            err,
            RadarError::Request(RequestError::AttachmentUnreadable { ref path, .. })
                if path == "/definitely/not/here.png"
        ));
    }

    #[test]
    fn test_debug_omits_payload() {
        let attachment = Attachment::new("a.png", "image/png", vec![0u8; 4]);
        assert_eq!(
            format!("{:?}", attachment),
            "Attachment { name: \"a.png\", mime_type: \"image/png\", len: 4 }"
        );
    }
}
