//! Error types for the registry client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." Other non-2xx responses land in `Http` with the status, the
//! backend's `message` when it sent one, and the raw body for debugging.
//! Expected answers (404 on email lookup, 409 on dog creation) never reach
//! this type; the client returns them as values.

use crate::http::TransportError;

/// Errors returned by `RegistryClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(.body.as_str()))]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// The backend's own explanation, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Local validation failures raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Full name and e-mail are required.")]
    MissingTutorFields,

    #[error("Pet name and breed are required.")]
    MissingPetFields,

    #[error("Please register or identify yourself before registering a pet.")]
    NoSession,

    #[error("Age must be a whole number, got {0:?}.")]
    InvalidAge(String),

    #[error("Weight must be a number, got {0:?}.")]
    InvalidWeight(String),

    #[error("No record is loaded for editing.")]
    NotEditing,
}
