use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use pixxi_frame::{decode_text, ErrorObserver, ErrorState, Reply, ReplyReader, Reporter, Request};
use pixxi_transport::Transport;
use tracing::{debug, trace};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::ops::Arg;
use crate::table::{Op, OperationTable};

/// One display on one link.
///
/// A call holds `&mut self` from the first byte written to the last byte read,
/// so exchanges never overlap.
pub struct Session<T: Transport> {
    transport: T,
    reporter: Reporter,
    table: OperationTable,
    config: SessionConfig,
}

impl<T: Transport> Session<T> {
    /// A session with the default timeout and the built-in table.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            reporter: Reporter::new(),
            table: OperationTable::builtin(),
            config,
        }
    }

    /// Swap in a different operation table.
    pub fn with_table(mut self, table: OperationTable) -> Self {
        self.table = table;
        self
    }

    /// Dispatch `op` with `args` and decode its reply.
    ///
    /// Arguments are validated before anything is written.
    pub fn call(&mut self, op: Op, args: &[Arg<'_>]) -> Result<Reply> {
        let descriptor = self.table.get(op);
        let name = descriptor.name;
        let request = descriptor.encode(args)?;
        let shape = descriptor.reply.resolve(name, args)?;

        debug!(
            op = name,
            opcode = %format!("0x{:04X}", request.opcode()),
            len = request.len(),
            "dispatching"
        );

        let mut reader =
            ReplyReader::begin(&mut self.transport, &mut self.reporter, self.config.timeout);
        reader.send(&request)?;
        let reply = reader.decode(shape)?;

        trace!(op = name, ?reply, "reply");
        Ok(reply)
    }

    /// Dispatch by wire-protocol name.
    pub fn call_named(&mut self, name: &str, args: &[Arg<'_>]) -> Result<Reply> {
        let op = Op::from_name(name).ok_or_else(|| SessionError::UnknownOperation(name.to_string()))?;
        self.call(op, args)
    }

    /// Encode without sending.
    pub fn encode(&self, op: Op, args: &[Arg<'_>]) -> Result<Request> {
        self.table.get(op).encode(args)
    }

    /// Outcome of the most recent exchange.
    pub fn last_error(&self) -> ErrorState {
        self.reporter.state()
    }

    /// Notify `observer` of every timeout and rejected reply.
    pub fn set_observer(&mut self, observer: impl ErrorObserver + 'static) {
        self.reporter.set_observer(observer);
    }

    pub fn clear_observer(&mut self) {
        self.reporter.clear_observer();
    }

    pub fn table(&self) -> &OperationTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut OperationTable {
        &mut self.table
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the underlying transport.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the session and return the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    pub(crate) fn call_ack(&mut self, op: Op, args: &[Arg<'_>]) -> Result<()> {
        match self.call(op, args)? {
            Reply::Ack => Ok(()),
            _ => Err(unexpected(op)),
        }
    }

    pub(crate) fn call_word(&mut self, op: Op, args: &[Arg<'_>]) -> Result<u16> {
        match self.call(op, args)? {
            Reply::Word(word) => Ok(word),
            _ => Err(unexpected(op)),
        }
    }

    pub(crate) fn call_two_words(&mut self, op: Op, args: &[Arg<'_>]) -> Result<(u16, u16)> {
        match self.call(op, args)? {
            Reply::TwoWords(first, second) => Ok((first, second)),
            _ => Err(unexpected(op)),
        }
    }

    pub(crate) fn call_word_two_words(
        &mut self,
        op: Op,
        args: &[Arg<'_>],
    ) -> Result<(u16, u16, u16)> {
        match self.call(op, args)? {
            Reply::WordTwoWords {
                result,
                first,
                second,
            } => Ok((result, first, second)),
            _ => Err(unexpected(op)),
        }
    }

    pub(crate) fn call_blob(&mut self, op: Op, args: &[Arg<'_>]) -> Result<(u16, Bytes)> {
        match self.call(op, args)? {
            Reply::Blob { result, payload } => Ok((result, payload)),
            _ => Err(unexpected(op)),
        }
    }

    pub(crate) fn call_text(&mut self, op: Op, args: &[Arg<'_>]) -> Result<String> {
        let (_, payload) = self.call_blob(op, args)?;
        Ok(decode_text(&payload))
    }
}

fn unexpected(op: Op) -> SessionError {
    SessionError::UnexpectedReply { op: op.name() }
}

impl<T: Transport + fmt::Debug> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("transport", &self.transport)
            .field("reporter", &self.reporter)
            .field("config", &self.config)
            .finish()
    }
}
