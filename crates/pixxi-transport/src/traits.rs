use std::time::Duration;

use crate::error::Result;

/// A half-duplex byte link to a display module.
///
/// Implementations never retry. A failed [`read_exact`](Transport::read_exact)
/// may leave bytes in flight; callers invoke
/// [`abort_pending_read`](Transport::abort_pending_read) before the next request.
pub trait Transport {
    /// Write the whole buffer, then flush.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Fill `buf` completely or fail with [`TransportError::Timeout`] once
    /// `timeout` has elapsed.
    ///
    /// [`TransportError::Timeout`]: crate::TransportError::Timeout
    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()>;

    /// Drop any partially received reply.
    fn abort_pending_read(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        (**self).read_exact(buf, timeout)
    }

    fn abort_pending_read(&mut self) -> Result<()> {
        (**self).abort_pending_read()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        (**self).read_exact(buf, timeout)
    }

    fn abort_pending_read(&mut self) -> Result<()> {
        (**self).abort_pending_read()
    }
}
