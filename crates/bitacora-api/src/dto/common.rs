//! Response envelope shared by every endpoint

use serde::Serialize;

/// JSON envelope: `{"data": ..., "message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Payload
    pub data: T,
    /// Optional human-readable note, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Envelope around `data` with no message
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Attach a message to the envelope
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
