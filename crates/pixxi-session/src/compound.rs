//! Helpers built from two or three table calls. They add no wire format of
//! their own and stop at the first failing call.

use pixxi_transport::Transport;

use crate::error::{Result, SessionError};
use crate::session::Session;

/// Widget words allocate this many bytes for the widget handle.
const WIDGET_HANDLE_BYTES: u16 = 24;

/// Display RAM set up by [`Session::widget_init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetAlloc {
    /// Block reserved for the widget itself.
    pub handle: u16,
    /// Block holding the uploaded parameter words.
    pub param: u16,
}

impl<T: Transport> Session<T> {
    /// Copy `text` into freshly allocated display RAM and return its address.
    pub fn widget_init_string(&mut self, text: &str) -> Result<u16> {
        self.upload_bytes("widget_InitString", text.as_bytes())
    }

    /// [`widget_init_string`](Self::widget_init_string), then resolve a string pointer to it.
    pub fn widget_init_string_ptr(&mut self, text: &str) -> Result<u16> {
        let address = self.widget_init_string(text)?;
        self.str_ptr(address)
    }

    /// Copy `bytes` into freshly allocated display RAM and return the string
    /// pointer the display resolves for it.
    pub fn widget_init_string_array(&mut self, bytes: &[u8]) -> Result<u16> {
        let address = self.upload_bytes("widget_InitStringArray", bytes)?;
        self.str_ptr(address)
    }

    /// Upload widget parameter words and reserve the widget's own block.
    pub fn widget_init(&mut self, params: &[u16]) -> Result<WidgetAlloc> {
        let bytes = u16::try_from(params.len())
            .ok()
            .and_then(|len| len.checked_mul(2))
            .ok_or(SessionError::InvalidArgument {
                op: "widget_Init",
                reason: "more than 32767 parameter words",
            })?;
        let param = self.mem_alloc(bytes)?;
        self.send_word_array_to_ram(param, params)?;
        let handle = self.mem_alloc(WIDGET_HANDLE_BYTES)?;
        Ok(WidgetAlloc { handle, param })
    }

    /// Print `text` one character at a time.
    pub fn print(&mut self, text: &str) -> Result<()> {
        for byte in text.bytes() {
            self.put_ch(u16::from(byte))?;
        }
        Ok(())
    }

    /// [`print`](Self::print), then a newline and carriage return.
    pub fn println(&mut self, text: &str) -> Result<()> {
        self.print(text)?;
        self.put_ch(u16::from(b'\n'))?;
        self.put_ch(u16::from(b'\r'))
    }

    /// Print `value` in `base` (2 to 36) with upper-case digits.
    pub fn print_number(&mut self, value: u64, base: u8) -> Result<()> {
        for digit in format_number(value, base)? {
            self.put_ch(u16::from(digit))?;
        }
        Ok(())
    }

    fn upload_bytes(&mut self, op: &'static str, bytes: &[u8]) -> Result<u16> {
        let len = u16::try_from(bytes.len()).map_err(|_| SessionError::InvalidArgument {
            op,
            reason: "string longer than 65535 bytes",
        })?;
        let address = self.mem_alloc(len)?;
        self.send_byte_array_to_ram(address, bytes)?;
        Ok(address)
    }
}

fn format_number(mut value: u64, base: u8) -> Result<Vec<u8>> {
    if !(2..=36).contains(&base) {
        return Err(SessionError::InvalidArgument {
            op: "print_number",
            reason: "base must be between 2 and 36",
        });
    }

    let base = u64::from(base);
    let mut digits = Vec::new();
    loop {
        let digit = (value % base) as u8;
        digits.push(if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        });
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    Ok(digits)
}
