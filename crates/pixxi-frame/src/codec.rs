use bytes::{BufMut, Bytes, BytesMut};

/// Opcode prefix: one big-endian word.
pub const OPCODE_SIZE: usize = 2;

/// Upper bound on text bytes placed in one request. Longer text is truncated.
pub const MAX_TEXT_LEN: usize = 1000;

/// An encoded request, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    opcode: u16,
    bytes: Bytes,
}

impl Request {
    /// The opcode this request starts with.
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// Full wire image, opcode included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wire size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a request carries at least its opcode.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes after the opcode.
    pub fn arguments(&self) -> &[u8] {
        &self.bytes[OPCODE_SIZE..]
    }
}

/// Appends arguments to a request in transmit order.
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────────┬─────┬──────────────────────┐
/// │ Opcode (2B)  │ Word 1 (2B)  │ ... │ Raw bytes / text     │
/// │ big-endian   │ big-endian   │     │ (no terminator)      │
/// └──────────────┴──────────────┴─────┴──────────────────────┘
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    opcode: u16,
    buf: BytesMut,
}

impl RequestBuilder {
    /// Start a request for `opcode`.
    pub fn new(opcode: u16) -> Self {
        let mut buf = BytesMut::with_capacity(16);
        encode_word(opcode, &mut buf);
        Self { opcode, buf }
    }

    /// Append one 16-bit word.
    pub fn word(&mut self, value: u16) -> &mut Self {
        encode_word(value, &mut self.buf);
        self
    }

    /// Append one raw byte.
    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    /// Append text, truncated to [`MAX_TEXT_LEN`] bytes.
    pub fn text(&mut self, text: &str) -> &mut Self {
        encode_text(text, &mut self.buf);
        self
    }

    /// Append raw bytes verbatim.
    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        encode_bytes(bytes, &mut self.buf);
        self
    }

    /// Append a run of 16-bit words.
    pub fn words(&mut self, words: &[u16]) -> &mut Self {
        encode_words(words, &mut self.buf);
        self
    }

    /// Bytes encoded so far, opcode included.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze into a [`Request`].
    pub fn finish(self) -> Request {
        Request {
            opcode: self.opcode,
            bytes: self.buf.freeze(),
        }
    }
}

/// Encode a word high byte first.
pub fn encode_word(value: u16, dst: &mut BytesMut) {
    dst.put_u16(value);
}

/// Encode the raw bytes of `text` up to [`MAX_TEXT_LEN`]. Returns the number of bytes written.
///
/// No length prefix and no terminator are emitted.
pub fn encode_text(text: &str, dst: &mut BytesMut) -> usize {
    let raw = text.as_bytes();
    let len = raw.len().min(MAX_TEXT_LEN);
    dst.put_slice(&raw[..len]);
    len
}

/// Encode exactly `bytes.len()` raw bytes.
pub fn encode_bytes(bytes: &[u8], dst: &mut BytesMut) {
    dst.put_slice(bytes);
}

/// Encode each word high byte first.
pub fn encode_words(words: &[u16], dst: &mut BytesMut) {
    dst.reserve(words.len() * 2);
    for &word in words {
        dst.put_u16(word);
    }
}

/// Assemble a big-endian word.
pub fn decode_word(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}
