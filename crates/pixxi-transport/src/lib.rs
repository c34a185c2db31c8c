//! Serial link abstraction for Pixxi display modules.
//!
//! Provides the byte-level contract the framing layer is written against:
//! - write a whole request
//! - read exactly `n` reply bytes before a deadline
//! - abort a pending read so the next exchange starts clean
//!
//! This is the lowest layer of pixxi. Everything else builds on top of
//! the [`Transport`] trait provided here.

pub mod error;
pub mod scripted;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use scripted::ScriptedTransport;
pub use serial::{available_ports, PortInfo, SerialConfig, SerialTransport, DEFAULT_BAUD_RATE};
pub use traits::Transport;
