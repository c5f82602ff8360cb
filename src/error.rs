//! Error handling for the NiFi flow cache
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling. A remote 404 is
//! deliberately *not* represented here for reads — the client layer maps it
//! to `Ok(None)` and only the update path promotes it to `ComponentNotFound`.

use std::fmt;

use thiserror::Error;

/// The kind of NiFi component an operation was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NiFiComponentKind {
    Processor,
    ProcessGroup,
}

impl fmt::Display for NiFiComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NiFiComponentKind::Processor => write!(f, "processor"),
            NiFiComponentKind::ProcessGroup => write!(f, "process group"),
        }
    }
}

/// Main error type for NiFi REST operations.
#[derive(Error, Debug)]
pub enum NiFiError {
    /// The addressed component does not exist — or, on the update path, its
    /// revision moved between our read and our write. The NiFi API reports
    /// both conditions as 404, so they cannot be told apart here.
    #[error("NiFi {kind} not found: {id}")]
    ComponentNotFound { id: String, kind: NiFiComponentKind },

    /// Non-404 error status from the NiFi API (body truncated).
    #[error("NiFi API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NiFiError {
    /// Shorthand used by the accessors when a 404 must become a typed failure.
    pub fn component_not_found(id: impl Into<String>, kind: NiFiComponentKind) -> Self {
        NiFiError::ComponentNotFound {
            id: id.into(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, NiFiError>;
