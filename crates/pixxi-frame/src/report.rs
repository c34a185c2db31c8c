use std::fmt;

use tracing::warn;

/// Protocol-level failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The reply did not arrive in full before the deadline.
    Timeout,
    /// The leading reply byte was not [`ACK`](crate::ACK).
    NegativeAck,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::NegativeAck => "negative acknowledgement",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the most recent exchange.
///
/// Cleared when a request starts; set at most once per exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorState {
    #[default]
    None,
    Timeout,
    NegativeAck(u8),
}

impl ErrorState {
    pub fn is_none(&self) -> bool {
        matches!(self, ErrorState::None)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ErrorState::None => None,
            ErrorState::Timeout => Some(ErrorKind::Timeout),
            ErrorState::NegativeAck(_) => Some(ErrorKind::NegativeAck),
        }
    }

    /// The rejected byte for `NegativeAck`, `0` otherwise.
    pub fn offending_byte(&self) -> u8 {
        match self {
            ErrorState::NegativeAck(byte) => *byte,
            _ => 0,
        }
    }
}

/// Receives protocol failures as they are recorded.
///
/// Called synchronously on the thread driving the exchange, once per failure.
pub trait ErrorObserver: Send {
    fn on_error(&mut self, kind: ErrorKind, offending_byte: u8);
}

impl<F> ErrorObserver for F
where
    F: FnMut(ErrorKind, u8) + Send,
{
    fn on_error(&mut self, kind: ErrorKind, offending_byte: u8) {
        self(kind, offending_byte)
    }
}

/// Holds the last [`ErrorState`] and the optional observer notified on failure.
#[derive(Default)]
pub struct Reporter {
    state: ErrorState,
    observer: Option<Box<dyn ErrorObserver>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that notifies `observer`.
    pub fn with_observer(observer: impl ErrorObserver + 'static) -> Self {
        Self {
            state: ErrorState::None,
            observer: Some(Box::new(observer)),
        }
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: impl ErrorObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove and return the observer.
    pub fn clear_observer(&mut self) -> Option<Box<dyn ErrorObserver>> {
        self.observer.take()
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub fn state(&self) -> ErrorState {
        self.state
    }

    /// Back to `None`. Called when a request starts.
    pub fn reset(&mut self) {
        self.state = ErrorState::None;
    }

    /// Record a receive timeout and notify the observer with `(Timeout, 0)`.
    pub fn record_timeout(&mut self) {
        self.record(ErrorState::Timeout);
    }

    /// Record a rejected reply and notify the observer with the offending byte.
    pub fn record_negative_ack(&mut self, byte: u8) {
        self.record(ErrorState::NegativeAck(byte));
    }

    fn record(&mut self, state: ErrorState) {
        self.state = state;
        let Some(kind) = state.kind() else {
            return;
        };
        let byte = state.offending_byte();
        warn!(kind = %kind, byte, "exchange failed");

        if let Some(observer) = self.observer.as_mut() {
            observer.on_error(kind, byte);
        }
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("state", &self.state)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recording_reporter() -> (Reporter, Arc<Mutex<Vec<(ErrorKind, u8)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let reporter = Reporter::with_observer(move |kind, byte| {
            sink.lock().unwrap().push((kind, byte));
        });
        (reporter, calls)
    }

    #[test]
    fn starts_clear() {
        let reporter = Reporter::new();
        assert!(reporter.state().is_none());
        assert!(!reporter.has_observer());
    }

    #[test]
    fn timeout_notifies_with_zero_byte() {
        let (mut reporter, calls) = recording_reporter();
        reporter.record_timeout();

        assert_eq!(reporter.state(), ErrorState::Timeout);
        assert_eq!(reporter.state().offending_byte(), 0);
        assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::Timeout, 0)]);
    }

    #[test]
    fn negative_ack_keeps_byte() {
        let (mut reporter, calls) = recording_reporter();
        reporter.record_negative_ack(0x15);

        assert_eq!(reporter.state(), ErrorState::NegativeAck(0x15));
        assert_eq!(reporter.state().kind(), Some(ErrorKind::NegativeAck));
        assert_eq!(*calls.lock().unwrap(), vec![(ErrorKind::NegativeAck, 0x15)]);
    }

    #[test]
    fn reset_returns_to_none_without_notifying() {
        let (mut reporter, calls) = recording_reporter();
        reporter.record_timeout();
        reporter.reset();

        assert!(reporter.state().is_none());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn cleared_observer_is_not_called() {
        let (mut reporter, calls) = recording_reporter();
        assert!(reporter.clear_observer().is_some());
        reporter.record_timeout();

        assert_eq!(reporter.state(), ErrorState::Timeout);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn observer_can_be_a_struct() {
        struct Counter(Arc<Mutex<usize>>);

        impl ErrorObserver for Counter {
            fn on_error(&mut self, _kind: ErrorKind, _offending_byte: u8) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let count = Arc::new(Mutex::new(0));
        let mut reporter = Reporter::new();
        reporter.set_observer(Counter(Arc::clone(&count)));
        reporter.record_negative_ack(0x00);

        assert_eq!(*count.lock().unwrap(), 1);
    }
}
