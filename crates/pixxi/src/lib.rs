//! Command/response driver for Pixxi serial display modules.
//!
//! pixxi encodes display operations as big-endian opcode frames, sends them
//! over a serial link, and decodes the fixed-format acknowledgement replies.
//!
//! # Crate Structure
//!
//! - [`transport`]: serial link abstraction (OS serial ports, scripted peer)
//! - [`frame`]: request encoding, reply decoding, error reporting
//! - [`session`]: operation table, dispatch and typed methods (behind `session` feature)

/// Re-export transport types.
pub mod transport {
    pub use pixxi_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use pixxi_frame::*;
}

/// Re-export session types (requires `session` feature).
#[cfg(feature = "session")]
pub mod session {
    pub use pixxi_session::*;
}
