//! Error types for the todo API client.
//!
//! # Design
//! Transport failures and API-level failures are separate enums joined by a
//! `From` impl, so client operations compose the layers with `?`. `NotFound`
//! gets a dedicated variant because callers frequently distinguish "the todo
//! does not exist" from "the server returned an unexpected status"; the
//! conversion lifts a transport-level 404 into it. Every failure kind stays
//! distinguishable: nothing is collapsed into a bare "no result".

use std::fmt;

/// Errors raised by [`Transport`](crate::http::Transport) calls.
#[derive(Debug)]
pub enum TransportError {
    /// The server answered with a status outside the 200-299 window.
    Status { status: u16, reason: String },

    /// The request never completed: connect, write, or read failed.
    Io(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status { status, reason } => {
                write!(f, "HTTP {status}: {reason}")
            }
            TransportError::Io(msg) => write!(f, "transport failed: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Errors returned by `TodoClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404, with the
    /// numeric code and reason phrase.
    Http { status: u16, reason: String },

    /// A network-level failure below the HTTP layer.
    Io(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// `update_todo` needs a server-assigned id and the item has none.
    MissingId,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "todo not found"),
            ApiError::Http { status, reason } => write!(f, "HTTP {status}: {reason}"),
            ApiError::Io(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::MissingId => write!(f, "todo has no server-assigned id"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status: 404, .. } => ApiError::NotFound,
            TransportError::Status { status, reason } => ApiError::Http { status, reason },
            TransportError::Io(msg) => ApiError::Io(msg),
        }
    }
}
