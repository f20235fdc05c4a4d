//! # Binding Errors
//!
//! Errors raised while validating a model, building a request, talking to the
//! transport, or writing a response back onto an instance.

use crate::binding::Verb;

/// Errors that can occur while executing a model request.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("{model}: descriptor field `{field}` is not declared on the model")]
    UndeclaredField {
        model: &'static str,
        field: &'static str,
    },
    #[error("{model}: field `{field}` is neither bound nor local-only")]
    UnboundField { model: &'static str, field: String },
    #[error("{model}: key field `{field}` is not set")]
    MissingKey {
        model: &'static str,
        field: &'static str,
    },
    #[error("{model}: key field `{field}` must not be empty")]
    EmptyKey {
        model: &'static str,
        field: &'static str,
    },
    #[error("{model}: key field `{field}` is not a scalar")]
    InvalidKey {
        model: &'static str,
        field: &'static str,
    },
    #[error("{model} does not support {verb}")]
    VerbNotSupported { model: &'static str, verb: Verb },
    #[error("{model}: failed to encode fields: {source}")]
    Encode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{model}: failed to decode response: {source}")]
    Decode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors reported by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TransportError {
    #[error("Transport closed")]
    Closed,
    #[error("Transport dropped response channel")]
    Dropped,
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Custom error: {0}")]
    Custom(String),
}
