use std::fmt::Write as _;

use pixxi_transport::Transport;
use tracing::{enabled, trace, Level};

use crate::codec::Request;
use crate::error::Result;

const MAX_DUMP_BYTES: usize = 64;

/// Write a complete request to the link.
pub fn write_request<T: Transport + ?Sized>(transport: &mut T, request: &Request) -> Result<()> {
    if enabled!(Level::TRACE) {
        trace!(
            opcode = %format!("0x{:04X}", request.opcode()),
            len = request.len(),
            bytes = %hex_dump(request.as_bytes()),
            "writing request"
        );
    }
    transport.write(request.as_bytes())?;
    Ok(())
}

/// Space-separated hex, truncated after [`MAX_DUMP_BYTES`].
pub(crate) fn hex_dump(bytes: &[u8]) -> String {
    let shown = bytes.len().min(MAX_DUMP_BYTES);
    let mut out = String::with_capacity(shown * 3 + 8);
    for (i, byte) in bytes[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    if bytes.len() > shown {
        let _ = write!(out, " .. (+{})", bytes.len() - shown);
    }
    out
}

#[cfg(test)]
mod tests {
    use pixxi_transport::{ScriptedTransport, TransportError};

    use super::*;
    use crate::codec::RequestBuilder;
    use crate::error::FrameError;

    struct ZeroWriter;

    impl Transport for ZeroWriter {
        fn write(&mut self, _bytes: &[u8]) -> pixxi_transport::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::WriteZero).into())
        }

        fn read_exact(
            &mut self,
            _buf: &mut [u8],
            _timeout: std::time::Duration,
        ) -> pixxi_transport::Result<()> {
            Ok(())
        }

        fn abort_pending_read(&mut self) -> pixxi_transport::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_whole_request() {
        let mut builder = RequestBuilder::new(0xFFCD);
        builder.words(&[1, 2, 3]);
        let request = builder.finish();
        let mut transport = ScriptedTransport::new();

        write_request(&mut transport, &request).unwrap();

        assert_eq!(transport.written(), request.as_bytes());
    }

    #[test]
    fn write_failure_is_transport_error() {
        let request = RequestBuilder::new(0x0001).finish();
        let err = write_request(&mut ZeroWriter, &request).unwrap_err();
        assert!(matches!(err, FrameError::Transport(TransportError::Io(_))));
    }

    #[test]
    fn hex_dump_truncates() {
        assert_eq!(hex_dump(&[0xFF, 0x0A]), "ff 0a");
        let long = vec![0u8; MAX_DUMP_BYTES + 5];
        assert!(hex_dump(&long).ends_with(" .. (+5)"));
    }
}
