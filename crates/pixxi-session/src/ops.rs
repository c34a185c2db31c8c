use std::fmt;

use pixxi_frame::{BlobLength, ReplyShape, Request, RequestBuilder, SECTOR_SIZE};
use serde::Serialize;

use crate::error::{Result, SessionError};
use crate::table::Op;

/// How one argument slot is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgShape {
    /// One big-endian word.
    Word,
    /// One raw byte.
    Byte,
    /// Raw text bytes, capped, no terminator.
    Text,
    /// A word that declares the item count of the runs after it.
    Count,
    /// A run of words, as many as the preceding `Count`.
    Words,
    /// A run of raw bytes, as many as the preceding `Count`.
    Bytes,
    /// Exactly one storage sector of raw bytes.
    Sector,
    /// RGB565 pixels: two bytes per pixel of the width and height words before it.
    Pixels,
}

impl fmt::Display for ArgShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgShape::Word => "a word",
            ArgShape::Byte => "a byte",
            ArgShape::Text => "text",
            ArgShape::Count => "a count word",
            ArgShape::Words => "a word run",
            ArgShape::Bytes => "a byte run",
            ArgShape::Sector => "a 512-byte sector",
            ArgShape::Pixels => "a pixel run",
        };
        f.write_str(name)
    }
}

/// How the reply to an operation is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySpec {
    Ack,
    AckWord,
    AckTwoWords,
    AckWordTwoWords,
    /// Ack, result word, one sector.
    Sector,
    /// Ack, length word, that many text bytes.
    Text,
    /// Ack, result word, as many bytes as the word argument at this index.
    DataSizedBy(usize),
}

impl ReplySpec {
    /// The concrete reply shape for a call with `args`.
    pub fn resolve(&self, op: &'static str, args: &[Arg<'_>]) -> Result<ReplyShape> {
        let shape = match *self {
            ReplySpec::Ack => ReplyShape::Ack,
            ReplySpec::AckWord => ReplyShape::AckWord,
            ReplySpec::AckTwoWords => ReplyShape::AckTwoWords,
            ReplySpec::AckWordTwoWords => ReplyShape::AckWordTwoWords,
            ReplySpec::Sector => ReplyShape::AckBlob(BlobLength::Fixed(SECTOR_SIZE)),
            ReplySpec::Text => ReplyShape::AckBlob(BlobLength::FromResult),
            ReplySpec::DataSizedBy(index) => match args.get(index) {
                Some(Arg::Word(len)) => ReplyShape::AckBlob(BlobLength::Fixed(usize::from(*len))),
                Some(other) => {
                    return Err(SessionError::ArgumentKind {
                        op,
                        index,
                        expected: ArgShape::Word,
                        actual: other.kind(),
                    })
                }
                None => {
                    return Err(SessionError::ArgumentCount {
                        op,
                        expected: index + 1,
                        actual: args.len(),
                    })
                }
            },
        };
        Ok(shape)
    }
}

/// One argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Word(u16),
    Byte(u8),
    Text(&'a str),
    Words(&'a [u16]),
    Bytes(&'a [u8]),
}

impl Arg<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Word(_) => "word",
            Arg::Byte(_) => "byte",
            Arg::Text(_) => "text",
            Arg::Words(_) => "word run",
            Arg::Bytes(_) => "byte run",
        }
    }
}

impl From<u16> for Arg<'_> {
    fn from(value: u16) -> Self {
        Arg::Word(value)
    }
}

impl From<u8> for Arg<'_> {
    fn from(value: u8) -> Self {
        Arg::Byte(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Text(value)
    }
}

impl<'a> From<&'a [u16]> for Arg<'a> {
    fn from(value: &'a [u16]) -> Self {
        Arg::Words(value)
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Arg::Bytes(value)
    }
}

/// Table entry: everything needed to encode a call and decode its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpDescriptor {
    #[serde(skip)]
    pub op: Op,
    pub name: &'static str,
    pub opcode: u16,
    pub args: &'static [ArgShape],
    pub reply: ReplySpec,
}

impl OpDescriptor {
    /// Validate `args` against the declared shapes and encode the request.
    ///
    /// Nothing is encoded unless every argument fits its slot.
    pub fn encode(&self, args: &[Arg<'_>]) -> Result<Request> {
        if args.len() != self.args.len() {
            return Err(SessionError::ArgumentCount {
                op: self.name,
                expected: self.args.len(),
                actual: args.len(),
            });
        }

        let mut builder = RequestBuilder::new(self.opcode);
        let mut count = None;

        for (index, (shape, arg)) in self.args.iter().zip(args).enumerate() {
            match (shape, arg) {
                (ArgShape::Word, Arg::Word(value)) => {
                    builder.word(*value);
                }
                (ArgShape::Count, Arg::Word(value)) => {
                    count = Some(usize::from(*value));
                    builder.word(*value);
                }
                (ArgShape::Byte, Arg::Byte(value)) => {
                    builder.byte(*value);
                }
                (ArgShape::Text, Arg::Text(text)) => {
                    builder.text(text);
                }
                (ArgShape::Words, Arg::Words(words)) => {
                    self.check_len(index, count, words.len())?;
                    builder.words(words);
                }
                (ArgShape::Bytes, Arg::Bytes(bytes)) => {
                    self.check_len(index, count, bytes.len())?;
                    builder.bytes(bytes);
                }
                (ArgShape::Sector, Arg::Bytes(bytes)) => {
                    self.check_len(index, Some(SECTOR_SIZE), bytes.len())?;
                    builder.bytes(bytes);
                }
                (ArgShape::Pixels, Arg::Bytes(bytes)) => {
                    self.check_len(index, Some(self.pixel_len(args, index)?), bytes.len())?;
                    builder.bytes(bytes);
                }
                (expected, actual) => {
                    return Err(SessionError::ArgumentKind {
                        op: self.name,
                        index,
                        expected: *expected,
                        actual: actual.kind(),
                    })
                }
            }
        }

        Ok(builder.finish())
    }

    fn check_len(&self, index: usize, expected: Option<usize>, actual: usize) -> Result<()> {
        match expected {
            Some(expected) if expected != actual => Err(SessionError::LengthMismatch {
                op: self.name,
                index,
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    // Width and height are the two words right before the pixel run.
    fn pixel_len(&self, args: &[Arg<'_>], index: usize) -> Result<usize> {
        let dims = index
            .checked_sub(2)
            .and_then(|start| args.get(start..index));
        match dims {
            Some([Arg::Word(width), Arg::Word(height)]) => {
                Ok(usize::from(*width) * usize::from(*height) * 2)
            }
            _ => Err(SessionError::InvalidArgument {
                op: self.name,
                reason: "pixel run must follow width and height words",
            }),
        }
    }
}
