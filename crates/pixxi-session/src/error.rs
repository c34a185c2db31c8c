use pixxi_frame::{ErrorKind, FrameError};

use crate::ops::ArgShape;

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The exchange failed on the wire.
    #[error("{0}")]
    Frame(#[from] FrameError),

    /// Transport-level error outside an exchange.
    #[error("transport error: {0}")]
    Transport(#[from] pixxi_transport::TransportError),

    /// Wrong number of arguments for the operation.
    #[error("{op}: expected {expected} arguments, got {actual}")]
    ArgumentCount {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument of the wrong kind for its slot.
    #[error("{op}: argument {index} must be {expected}, got {actual}")]
    ArgumentKind {
        op: &'static str,
        index: usize,
        expected: ArgShape,
        actual: &'static str,
    },

    /// A run whose length disagrees with its declared count.
    #[error("{op}: argument {index} holds {actual} items, expected {expected}")]
    LengthMismatch {
        op: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// An argument value the operation cannot carry.
    #[error("{op}: {reason}")]
    InvalidArgument {
        op: &'static str,
        reason: &'static str,
    },

    /// No operation with this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Opcode override that is not a 16-bit value.
    #[error("invalid opcode {value:?} for {name}")]
    InvalidOpcode { name: String, value: String },

    /// The decoded reply does not have the shape the caller asked for.
    #[error("{op}: reply does not match its declared shape")]
    UnexpectedReply { op: &'static str },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// The protocol failure kind behind this error, if any.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Frame(err) => err.kind(),
            SessionError::Transport(err) if err.is_timeout() => Some(ErrorKind::Timeout),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
