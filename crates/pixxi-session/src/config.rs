use std::time::Duration;

/// Budget for one whole exchange, from the first byte written to the last byte read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Session tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Deadline shared by every read of one call. Default: 3000 ms.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}
