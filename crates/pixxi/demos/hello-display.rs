//! Clear the screen, draw a few shapes and print a greeting.
//!
//! Run with:
//!   cargo run --example hello-display -- /dev/ttyUSB0

use pixxi::session::{ErrorKind, Session};
use pixxi::transport::SerialTransport;

const RED: u16 = 0xF800;
const GREEN: u16 = 0x07E0;
const WHITE: u16 = 0xFFFF;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::args()
        .nth(1)
        .ok_or("usage: hello-display <serial-port>")?;

    let transport = SerialTransport::open_path(port)?;
    let mut display = Session::new(transport);
    display.set_observer(|kind: ErrorKind, byte: u8| {
        eprintln!("display reported {kind} (byte 0x{byte:02X})");
    });

    let model = display.sys_get_model()?;
    eprintln!("Connected to {model}");

    display.gfx_cls()?;
    display.gfx_circle_filled(60, 60, 30, RED)?;
    display.gfx_rectangle(10, 110, 110, 150, GREEN)?;

    display.txt_fg_colour(WHITE)?;
    display.txt_move_cursor(12, 1)?;
    display.println("hello, display")?;

    let version = display.sys_get_version()?;
    display.print("firmware ")?;
    display.print_number(u64::from(version), 16)?;

    Ok(())
}
