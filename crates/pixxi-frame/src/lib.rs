//! Request encoding and acknowledgement reply decoding for Pixxi display modules.
//!
//! This is the core of pixxi. Every request on the wire is:
//! - A 2-byte big-endian opcode
//! - Zero or more big-endian 16-bit words, raw bytes or text
//!
//! Every reply starts with an acknowledgement byte (`0x06` on success)
//! followed by a payload whose size is fixed per opcode. Replies are never
//! resynchronized: a short or rejected reply fails the exchange and records
//! the failure in a [`Reporter`]. Only a short or failed read flushes the link.

pub mod codec;
pub mod error;
pub mod reader;
pub mod reply;
pub mod report;
pub mod writer;

pub use codec::{
    decode_word, encode_bytes, encode_text, encode_word, encode_words, Request, RequestBuilder,
    MAX_TEXT_LEN, OPCODE_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::ReplyReader;
pub use reply::{decode_text, BlobLength, Reply, ReplyShape, ACK, SECTOR_SIZE};
pub use report::{ErrorKind, ErrorObserver, ErrorState, Reporter};
pub use writer::write_request;
