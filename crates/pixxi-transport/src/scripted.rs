use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

use crate::error::{Result, TransportError};
use crate::traits::Transport;

/// An in-memory peer that replays queued reply bytes.
///
/// Every write is captured and every read and abort is counted, so callers can
/// assert exactly what crossed the link. A read that asks for more bytes than
/// are queued consumes what is there and fails with a timeout, the same way a
/// real port behaves when the display goes quiet mid-reply.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<u8>,
    written: Vec<u8>,
    reads: usize,
    aborts: usize,
}

impl ScriptedTransport {
    /// A peer that never answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A peer with `bytes` already queued.
    pub fn with_reply(bytes: &[u8]) -> Self {
        let mut transport = Self::new();
        transport.push_reply(bytes);
        transport
    }

    /// Queue more reply bytes.
    pub fn push_reply(&mut self, bytes: &[u8]) {
        self.replies.extend(bytes.iter().copied());
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Forget captured writes.
    pub fn clear_written(&mut self) {
        self.written.clear();
    }

    /// Number of `read_exact` calls issued.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of `abort_pending_read` calls issued.
    pub fn aborts(&self) -> usize {
        self.aborts
    }

    /// Reply bytes not yet consumed.
    pub fn pending(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for ScriptedTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        self.reads += 1;
        let available = self.replies.len().min(buf.len());
        for (slot, byte) in buf.iter_mut().zip(self.replies.drain(..available)) {
            *slot = byte;
        }

        if available < buf.len() {
            return Err(TransportError::Timeout {
                expected: buf.len(),
                received: available,
                timeout,
            });
        }

        trace!(len = buf.len(), "scripted read");
        Ok(())
    }

    fn abort_pending_read(&mut self) -> Result<()> {
        self.aborts += 1;
        self.replies.clear();
        Ok(())
    }
}
