//! Content parts and messages exchanged with `generateContent`.

use serde::{Deserialize, Serialize};

/// A part of a content message.
///
/// Requests only ever carry text and inline data. Responses may contain part
/// kinds this crate does not model; those are kept verbatim in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    InlineData {
        /// The inline data blob.
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: Blob,
    },
    /// Any other part kind returned by the service.
    Other(serde_json::Map<String, serde_json::Value>),
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Creates an inline data part from already base64-encoded data.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// The text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }

    /// The blob of an inline data part.
    pub fn as_inline_data(&self) -> Option<&Blob> {
        match self {
            Part::InlineData { inline_data } => Some(inline_data),
            _ => None,
        }
    }
}

/// Binary data blob with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data.
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Base64-encoded binary data.
    pub data: String,
}

impl Blob {
    /// Renders the blob as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn made of `parts`.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }

    /// A role-less content holding one text part, as used for system instructions.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// The role of a message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
}
