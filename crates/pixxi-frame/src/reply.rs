use bytes::Bytes;

use crate::codec::decode_word;

/// Acknowledgement byte sent by the display on success.
pub const ACK: u8 = 0x06;

/// Size of a storage sector moved by sector reads and writes.
pub const SECTOR_SIZE: usize = 512;

/// Where the payload length of a blob reply comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobLength {
    /// A length known before the request is sent.
    Fixed(usize),
    /// The result word that precedes the payload.
    FromResult,
}

/// The fixed layout of a reply, chosen per opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// `[ack]`
    Ack,
    /// `[ack, hi, lo]`
    AckWord,
    /// `[ack, hi, lo, hi, lo]`
    AckTwoWords,
    /// `[ack, result hi, lo, hi, lo, hi, lo]`
    AckWordTwoWords,
    /// `[ack]`, then `[result hi, lo]`, then the payload.
    AckBlob(BlobLength),
}

impl ReplyShape {
    /// Total reply bytes, when known before the reply arrives.
    pub fn wire_size(&self) -> Option<usize> {
        match self {
            ReplyShape::Ack => Some(1),
            ReplyShape::AckWord => Some(3),
            ReplyShape::AckTwoWords => Some(5),
            ReplyShape::AckWordTwoWords => Some(7),
            ReplyShape::AckBlob(BlobLength::Fixed(len)) => Some(3 + len),
            ReplyShape::AckBlob(BlobLength::FromResult) => None,
        }
    }
}

/// A decoded, acknowledged reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ack,
    Word(u16),
    TwoWords(u16, u16),
    WordTwoWords { result: u16, first: u16, second: u16 },
    Blob { result: u16, payload: Bytes },
}

impl Reply {
    /// The single result word of a `Word` reply, or the leading word of any reply that carries one.
    pub fn result(&self) -> Option<u16> {
        match self {
            Reply::Ack => None,
            Reply::Word(word) => Some(*word),
            Reply::TwoWords(first, _) => Some(*first),
            Reply::WordTwoWords { result, .. } | Reply::Blob { result, .. } => Some(*result),
        }
    }

    /// Payload bytes of a `Blob` reply.
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Reply::Blob { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Split an `AckWord` reply. The word is assembled whatever the ack byte says.
pub fn parse_ack_word(raw: [u8; 3]) -> (u8, u16) {
    (raw[0], decode_word([raw[1], raw[2]]))
}

/// Split an `AckTwoWords` reply.
pub fn parse_ack_two_words(raw: [u8; 5]) -> (u8, u16, u16) {
    (
        raw[0],
        decode_word([raw[1], raw[2]]),
        decode_word([raw[3], raw[4]]),
    )
}

/// Split an `AckWordTwoWords` reply.
pub fn parse_ack_word_two_words(raw: [u8; 7]) -> (u8, u16, u16, u16) {
    (
        raw[0],
        decode_word([raw[1], raw[2]]),
        decode_word([raw[3], raw[4]]),
        decode_word([raw[5], raw[6]]),
    )
}

/// Text carried in a blob payload.
///
/// Trailing NULs are dropped and invalid UTF-8 is replaced; nothing is read
/// past the payload.
pub fn decode_text(payload: &[u8]) -> String {
    let end = payload
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    String::from_utf8_lossy(&payload[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ack_word() {
        assert_eq!(parse_ack_word([0x06, 0x00, 0x2A]), (ACK, 42));
    }

    #[test]
    fn test_parse_ack_word_keeps_word_on_nak() {
        assert_eq!(parse_ack_word([0x15, 0x12, 0x34]), (0x15, 0x1234));
    }

    #[test]
    fn test_parse_two_words_fixed_offsets() {
        assert_eq!(
            parse_ack_two_words([0x06, 0x00, 0x01, 0x00, 0x02]),
            (ACK, 1, 2)
        );
    }

    #[test]
    fn test_parse_word_two_words() {
        assert_eq!(
            parse_ack_word_two_words([0x06, 0x00, 0x01, 0x00, 0x02, 0x80, 0x00]),
            (ACK, 1, 2, 0x8000)
        );
    }

    #[test]
    fn test_wire_sizes() {
        assert_eq!(ReplyShape::Ack.wire_size(), Some(1));
        assert_eq!(ReplyShape::AckWord.wire_size(), Some(3));
        assert_eq!(ReplyShape::AckTwoWords.wire_size(), Some(5));
        assert_eq!(ReplyShape::AckWordTwoWords.wire_size(), Some(7));
        assert_eq!(
            ReplyShape::AckBlob(BlobLength::Fixed(SECTOR_SIZE)).wire_size(),
            Some(515)
        );
        assert_eq!(ReplyShape::AckBlob(BlobLength::FromResult).wire_size(), None);
    }

    #[test]
    fn test_decode_text_strips_trailing_nuls() {
        assert_eq!(decode_text(b"uLCD-32\0\0"), "uLCD-32");
        assert_eq!(decode_text(b"\0\0"), "");
        assert_eq!(decode_text(b""), "");
    }

    #[test]
    fn test_decode_text_is_lossy() {
        assert_eq!(decode_text(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn test_reply_accessors() {
        let blob = Reply::Blob {
            result: 3,
            payload: Bytes::from_static(b"abc"),
        };
        assert_eq!(blob.result(), Some(3));
        assert_eq!(blob.payload().map(|p| p.as_ref()), Some(b"abc".as_ref()));
        assert_eq!(Reply::Ack.result(), None);
    }
}
