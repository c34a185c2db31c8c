use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info, trace};

use crate::error::{Result, TransportError};
use crate::traits::Transport;

/// The only rate the driver speaks. Baud negotiation is not supported.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// Settings used to open a serial link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub path: String,
    /// Line rate. Default: 115200.
    pub baud_rate: u32,
    /// Upper bound on a single blocking write.
    pub write_timeout: Duration,
}

impl SerialConfig {
    /// Configuration for `path` with the default rate and write timeout.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// A [`Transport`] backed by an OS serial port (8N1, no flow control).
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    config: SerialConfig,
}

impl SerialTransport {
    /// Open the device described by `config` and discard anything already buffered.
    pub fn open(config: SerialConfig) -> Result<Self> {
        let port = serialport::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.write_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: config.path.clone(),
                source,
            })?;
        port.clear(ClearBuffer::All)?;

        info!(path = %config.path, baud = config.baud_rate, "opened serial port");
        Ok(Self { port, config })
    }

    /// Open `path` at the default rate.
    pub fn open_path(path: impl Into<String>) -> Result<Self> {
        Self::open(SerialConfig::new(path))
    }

    /// The configuration this port was opened with.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.set_timeout(self.config.write_timeout)?;
        self.port.write_all(bytes)?;
        self.port.flush()?;
        trace!(len = bytes.len(), "wrote request bytes");
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut filled = 0usize;

        while filled < buf.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(TransportError::Timeout {
                    expected: buf.len(),
                    received: filled,
                    timeout,
                });
            }

            self.port.set_timeout(remaining)?;
            match self.port.read(&mut buf[filled..]) {
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        trace!(len = buf.len(), "read reply bytes");
        Ok(())
    }

    fn abort_pending_read(&mut self) -> Result<()> {
        let pending = self.port.bytes_to_read().unwrap_or(0);
        self.port.clear(ClearBuffer::Input)?;
        debug!(pending, "discarded pending input");
        Ok(())
    }
}

impl fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialTransport")
            .field("path", &self.config.path)
            .field("baud_rate", &self.config.baud_rate)
            .finish()
    }
}

/// A serial device visible to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Device path.
    pub name: String,
    /// Bus kind: `usb`, `pci`, `bluetooth` or `unknown`.
    pub kind: &'static str,
    /// Product string for USB adapters, when reported.
    pub product: Option<String>,
}

/// Enumerate serial devices.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|port| {
            let (kind, product) = match port.port_type {
                SerialPortType::UsbPort(usb) => ("usb", usb.product),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortInfo {
                name: port.port_name,
                kind,
                product,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_config_defaults_to_fixed_rate() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.path, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.write_timeout, DEFAULT_WRITE_TIMEOUT);
    }

    #[test]
    fn open_missing_device_reports_path() {
        let path = format!("/dev/pixxi-missing-{}", std::process::id());
        let err = SerialTransport::open_path(path.clone()).expect_err("missing device should fail");
        match err {
            TransportError::Open { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
