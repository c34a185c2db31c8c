use std::time::{Duration, Instant};

use bytes::Bytes;
use pixxi_transport::{Transport, TransportError};
use tracing::{trace, warn};

use crate::codec::{decode_word, Request};
use crate::error::{FrameError, Result};
use crate::reply::{
    parse_ack_two_words, parse_ack_word, parse_ack_word_two_words, BlobLength, Reply, ReplyShape,
    ACK,
};
use crate::report::{ErrorState, Reporter};
use crate::writer::write_request;

/// Drives one request/reply exchange under a single deadline.
///
/// Reads are guarded: once a step has failed, later steps of the same
/// exchange return [`FrameError::PriorFailure`] without touching the link.
/// A failed or short read discards pending input before returning. A rejected
/// acknowledgement is recorded but leaves the link untouched.
pub struct ReplyReader<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    reporter: &'a mut Reporter,
    timeout: Duration,
    deadline: Instant,
}

impl<'a, T: Transport + ?Sized> ReplyReader<'a, T> {
    /// Start an exchange: clears the reporter and arms a deadline `timeout` from now.
    pub fn begin(transport: &'a mut T, reporter: &'a mut Reporter, timeout: Duration) -> Self {
        reporter.reset();
        Self {
            transport,
            reporter,
            timeout,
            deadline: Instant::now() + timeout,
        }
    }

    /// Write the request this exchange answers.
    pub fn send(&mut self, request: &Request) -> Result<()> {
        write_request(&mut *self.transport, request)
    }

    /// Decode a reply of the given shape.
    pub fn decode(&mut self, shape: ReplyShape) -> Result<Reply> {
        match shape {
            ReplyShape::Ack => self.decode_ack().map(|()| Reply::Ack),
            ReplyShape::AckWord => self.decode_ack_word().map(Reply::Word),
            ReplyShape::AckTwoWords => self
                .decode_ack_two_words()
                .map(|(first, second)| Reply::TwoWords(first, second)),
            ReplyShape::AckWordTwoWords => {
                self.decode_ack_word_two_words()
                    .map(|(result, first, second)| Reply::WordTwoWords {
                        result,
                        first,
                        second,
                    })
            }
            ReplyShape::AckBlob(length) => self
                .decode_ack_blob(length)
                .map(|(result, payload)| Reply::Blob { result, payload }),
        }
    }

    /// One acknowledgement byte.
    pub fn decode_ack(&mut self) -> Result<()> {
        let mut raw = [0u8; 1];
        self.receive(&mut raw)?;
        self.check_ack(raw[0])
    }

    /// Ack and result word, received together.
    pub fn decode_ack_word(&mut self) -> Result<u16> {
        let mut raw = [0u8; 3];
        self.receive(&mut raw)?;
        let (ack, word) = parse_ack_word(raw);
        self.check_ack(ack)?;
        Ok(word)
    }

    /// Ack and two words, received together. Nothing after the fifth byte is read.
    pub fn decode_ack_two_words(&mut self) -> Result<(u16, u16)> {
        let mut raw = [0u8; 5];
        self.receive(&mut raw)?;
        let (ack, first, second) = parse_ack_two_words(raw);
        self.check_ack(ack)?;
        Ok((first, second))
    }

    /// Ack, result word and two words, received together.
    pub fn decode_ack_word_two_words(&mut self) -> Result<(u16, u16, u16)> {
        let mut raw = [0u8; 7];
        self.receive(&mut raw)?;
        let (ack, result, first, second) = parse_ack_word_two_words(raw);
        self.check_ack(ack)?;
        Ok((result, first, second))
    }

    /// Ack, then the result word, then the payload, each read separately.
    pub fn decode_ack_blob(&mut self, length: BlobLength) -> Result<(u16, Bytes)> {
        self.read_ack()?;
        let result = self.read_word()?;
        let len = match length {
            BlobLength::Fixed(len) => len,
            BlobLength::FromResult => usize::from(result),
        };
        let payload = self.read_payload(len)?;
        Ok((result, payload))
    }

    /// Guarded step: one acknowledgement byte.
    pub fn read_ack(&mut self) -> Result<()> {
        self.decode_ack()
    }

    /// Guarded step: one big-endian word.
    pub fn read_word(&mut self) -> Result<u16> {
        let mut raw = [0u8; 2];
        self.receive(&mut raw)?;
        Ok(decode_word(raw))
    }

    /// Guarded step: exactly `len` raw bytes.
    pub fn read_payload(&mut self, len: usize) -> Result<Bytes> {
        self.guard()?;
        if len == 0 {
            return Ok(Bytes::new());
        }
        let mut buf = vec![0u8; len];
        self.receive(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Error state of this exchange so far.
    pub fn state(&self) -> ErrorState {
        self.reporter.state()
    }

    /// Time left before the exchange deadline.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    fn guard(&self) -> Result<()> {
        match self.reporter.state().kind() {
            Some(kind) => {
                trace!(%kind, "skipping read after earlier failure");
                Err(FrameError::PriorFailure(kind))
            }
            None => Ok(()),
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<()> {
        self.guard()?;
        let remaining = self.remaining();
        match self.transport.read_exact(buf, remaining) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.discard_pending();
                self.reporter.record_timeout();
                Err(match err {
                    TransportError::Timeout {
                        expected, received, ..
                    } => FrameError::Timeout {
                        expected,
                        received,
                        timeout: self.timeout,
                    },
                    other => FrameError::Transport(other),
                })
            }
        }
    }

    fn check_ack(&mut self, byte: u8) -> Result<()> {
        if byte == ACK {
            return Ok(());
        }
        self.reporter.record_negative_ack(byte);
        Err(FrameError::NegativeAck { byte })
    }

    fn discard_pending(&mut self) {
        if let Err(err) = self.transport.abort_pending_read() {
            warn!(error = %err, "failed to discard pending input");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pixxi_transport::ScriptedTransport;

    use super::*;
    use crate::codec::RequestBuilder;
    use crate::report::ErrorKind;
    use crate::reply::SECTOR_SIZE;

    const TIMEOUT: Duration = Duration::from_millis(3000);

    type Calls = Arc<Mutex<Vec<(ErrorKind, u8)>>>;

    fn observed() -> (Reporter, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let reporter = Reporter::with_observer(move |kind, byte| {
            sink.lock().unwrap().push((kind, byte));
        });
        (reporter, calls)
    }

    /// Records the timeout handed to every read and never answers.
    #[derive(Default)]
    struct SilentTransport {
        timeouts: Vec<Duration>,
        aborts: usize,
    }

    impl Transport for SilentTransport {
        fn write(&mut self, _bytes: &[u8]) -> pixxi_transport::Result<()> {
            Ok(())
        }

        fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> pixxi_transport::Result<()> {
            self.timeouts.push(timeout);
            Err(TransportError::Timeout {
                expected: buf.len(),
                received: 0,
                timeout,
            })
        }

        fn abort_pending_read(&mut self) -> pixxi_transport::Result<()> {
            self.aborts += 1;
            Ok(())
        }
    }

    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn write(&mut self, _bytes: &[u8]) -> pixxi_transport::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged").into())
        }

        fn read_exact(&mut self, _buf: &mut [u8], _timeout: Duration) -> pixxi_transport::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged").into())
        }

        fn abort_pending_read(&mut self) -> pixxi_transport::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn ack_byte_is_success() {
        let mut transport = ScriptedTransport::with_reply(&[ACK]);
        let (mut reporter, calls) = observed();

        ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack()
            .unwrap();

        assert!(reporter.state().is_none());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn any_other_byte_is_negative_ack() {
        for byte in (0u8..=255).filter(|b| *b != ACK) {
            let mut transport = ScriptedTransport::with_reply(&[byte]);
            let (mut reporter, calls) = observed();

            let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
                .decode_ack()
                .unwrap_err();

            assert!(matches!(err, FrameError::NegativeAck { byte: b } if b == byte));
            assert_eq!(reporter.state(), ErrorState::NegativeAck(byte));
            assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::NegativeAck, byte)]);
        }
    }

    #[test]
    fn ack_word_decodes_big_endian() {
        let mut transport = ScriptedTransport::with_reply(&[0x06, 0x00, 0x2A]);
        let mut reporter = Reporter::new();

        let word = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_word()
            .unwrap();

        assert_eq!(word, 42);
        assert!(reporter.state().is_none());
        assert_eq!(transport.reads(), 1);
    }

    #[test]
    fn two_words_reads_only_five_bytes() {
        let mut transport = ScriptedTransport::with_reply(&[
            0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04,
        ]);
        let mut reporter = Reporter::new();

        let words = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_two_words()
            .unwrap();

        assert_eq!(words, (1, 2));
        assert_eq!(transport.pending(), 4);
        assert_eq!(transport.aborts(), 0);
    }

    #[test]
    fn word_two_words_splits_seven_bytes() {
        let mut transport =
            ScriptedTransport::with_reply(&[0x06, 0x00, 0x01, 0x00, 0x02, 0x34, 0x56]);
        let mut reporter = Reporter::new();

        let reply = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode(ReplyShape::AckWordTwoWords)
            .unwrap();

        assert_eq!(
            reply,
            Reply::WordTwoWords {
                result: 1,
                first: 2,
                second: 0x3456
            }
        );
    }

    #[test]
    fn every_shape_times_out_once_with_zero_byte() {
        let shapes = [
            ReplyShape::Ack,
            ReplyShape::AckWord,
            ReplyShape::AckTwoWords,
            ReplyShape::AckWordTwoWords,
            ReplyShape::AckBlob(BlobLength::Fixed(SECTOR_SIZE)),
            ReplyShape::AckBlob(BlobLength::FromResult),
        ];

        for shape in shapes {
            let mut transport = SilentTransport::default();
            let (mut reporter, calls) = observed();

            let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
                .decode(shape)
                .unwrap_err();

            assert!(matches!(err, FrameError::Timeout { received: 0, .. }), "{shape:?}");
            assert_eq!(reporter.state(), ErrorState::Timeout);
            assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::Timeout, 0)]);
            assert_eq!(transport.timeouts.len(), 1, "{shape:?}");
            assert_eq!(transport.aborts, 1);
        }
    }

    #[test]
    fn partial_reply_times_out_and_flushes() {
        let mut transport = ScriptedTransport::with_reply(&[0x06, 0x00]);
        let mut reporter = Reporter::new();

        let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_word()
            .unwrap_err();

        assert!(matches!(
            err,
            FrameError::Timeout {
                expected: 3,
                received: 2,
                ..
            }
        ));
        assert_eq!(transport.aborts(), 1);
        assert_eq!(transport.pending(), 0);
    }

    #[test]
    fn negative_ack_leaves_following_bytes_unread() {
        let mut transport = ScriptedTransport::with_reply(&[0x15, ACK]);
        let mut reporter = Reporter::new();

        let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack()
            .unwrap_err();

        assert!(matches!(err, FrameError::NegativeAck { byte: 0x15 }));
        assert_eq!(transport.aborts(), 0);
        assert_eq!(transport.pending(), 1);
    }

    #[test]
    fn blob_nak_at_ack_stage_reads_nothing_more() {
        let mut transport = ScriptedTransport::with_reply(&[0x15, 0x00, 0x05, b'h', b'e']);
        let (mut reporter, calls) = observed();

        let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_blob(BlobLength::FromResult)
            .unwrap_err();

        assert!(matches!(err, FrameError::NegativeAck { byte: 0x15 }));
        assert_eq!(transport.reads(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::NegativeAck, 0x15)]);
    }

    #[test]
    fn guard_skips_steps_after_failure() {
        let mut transport = ScriptedTransport::with_reply(&[0x15]);
        let (mut reporter, calls) = observed();
        let mut reader = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT);

        assert!(reader.read_ack().is_err());
        let err = reader.read_word().unwrap_err();
        assert!(matches!(
            err,
            FrameError::PriorFailure(ErrorKind::NegativeAck)
        ));
        assert!(reader.read_payload(SECTOR_SIZE).is_err());
        assert!(reader.read_payload(0).is_err());

        drop(reader);
        assert_eq!(transport.reads(), 1);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn blob_length_from_result_word() {
        let mut transport = ScriptedTransport::with_reply(&[0x06, 0x00, 0x03, b'a', b'b', b'c']);
        let mut reporter = Reporter::new();

        let (result, payload) = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_blob(BlobLength::FromResult)
            .unwrap();

        assert_eq!(result, 3);
        assert_eq!(payload.as_ref(), b"abc");
        assert_eq!(transport.reads(), 3);
    }

    #[test]
    fn blob_with_empty_payload_reads_two_steps() {
        let mut transport = ScriptedTransport::with_reply(&[0x06, 0x00, 0x00]);
        let mut reporter = Reporter::new();

        let (result, payload) = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_blob(BlobLength::FromResult)
            .unwrap();

        assert_eq!(result, 0);
        assert!(payload.is_empty());
        assert_eq!(transport.reads(), 2);
    }

    #[test]
    fn sector_blob_reads_fixed_length() {
        let mut wire = vec![0x06, 0x00, 0x01];
        wire.extend(std::iter::repeat(0xAB).take(SECTOR_SIZE));
        let mut transport = ScriptedTransport::with_reply(&wire);
        let mut reporter = Reporter::new();

        let reply = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode(ReplyShape::AckBlob(BlobLength::Fixed(SECTOR_SIZE)))
            .unwrap();

        assert_eq!(reply.result(), Some(1));
        assert_eq!(reply.payload().map(|p| p.len()), Some(SECTOR_SIZE));
    }

    #[test]
    fn reads_share_one_deadline() {
        struct SlowAck {
            timeouts: Vec<Duration>,
        }

        impl Transport for SlowAck {
            fn write(&mut self, _bytes: &[u8]) -> pixxi_transport::Result<()> {
                Ok(())
            }

            fn read_exact(
                &mut self,
                buf: &mut [u8],
                timeout: Duration,
            ) -> pixxi_transport::Result<()> {
                self.timeouts.push(timeout);
                std::thread::sleep(Duration::from_millis(20));
                buf.fill(0);
                buf[0] = ACK;
                Ok(())
            }

            fn abort_pending_read(&mut self) -> pixxi_transport::Result<()> {
                Ok(())
            }
        }

        let mut transport = SlowAck {
            timeouts: Vec::new(),
        };
        let mut reporter = Reporter::new();
        ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack_blob(BlobLength::Fixed(4))
            .unwrap();

        assert_eq!(transport.timeouts.len(), 3);
        assert!(transport.timeouts[0] <= TIMEOUT);
        assert!(transport.timeouts[1] < transport.timeouts[0]);
        assert!(transport.timeouts[2] < transport.timeouts[1]);
    }

    #[test]
    fn io_failure_is_recorded_as_timeout() {
        let mut transport = BrokenTransport;
        let (mut reporter, calls) = observed();

        let err = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack()
            .unwrap_err();

        assert!(matches!(err, FrameError::Transport(TransportError::Io(_))));
        assert_eq!(reporter.state(), ErrorState::Timeout);
        assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::Timeout, 0)]);
    }

    #[test]
    fn begin_clears_previous_failure() {
        let mut transport = ScriptedTransport::new();
        let mut reporter = Reporter::new();
        reporter.record_negative_ack(0x15);

        transport.push_reply(&[ACK]);
        ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT)
            .decode_ack()
            .unwrap();

        assert!(reporter.state().is_none());
    }

    #[test]
    fn send_writes_request_bytes() {
        let mut transport = ScriptedTransport::with_reply(&[ACK]);
        let mut reporter = Reporter::new();
        let mut builder = RequestBuilder::new(0xFFD7);
        builder.word(1);
        let request = builder.finish();

        let mut reader = ReplyReader::begin(&mut transport, &mut reporter, TIMEOUT);
        reader.send(&request).unwrap();
        reader.decode_ack().unwrap();
        drop(reader);

        assert_eq!(transport.written(), &[0xFF, 0xD7, 0x00, 0x01]);
    }
}
