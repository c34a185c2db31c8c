use std::time::Duration;

use pixxi_transport::TransportError;

use crate::report::ErrorKind;

/// Errors that can occur while exchanging a request and its reply.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The reply did not arrive in full before the exchange deadline.
    #[error("no reply within {timeout:?} ({received} of {expected} bytes)")]
    Timeout {
        expected: usize,
        received: usize,
        timeout: Duration,
    },

    /// The display rejected the request.
    #[error("negative acknowledgement 0x{byte:02X}")]
    NegativeAck { byte: u8 },

    /// A later step of a multi-read reply was skipped because an earlier one failed.
    #[error("read skipped after earlier {0} in this exchange")]
    PriorFailure(ErrorKind),

    /// The link itself failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl FrameError {
    /// The protocol-level failure kind, if this is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FrameError::Timeout { .. } => Some(ErrorKind::Timeout),
            FrameError::NegativeAck { .. } => Some(ErrorKind::NegativeAck),
            FrameError::PriorFailure(kind) => Some(*kind),
            FrameError::Transport(err) if err.is_timeout() => Some(ErrorKind::Timeout),
            FrameError::Transport(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
