//! Copy a file from the display's card to stdout.
//!
//! Run with:
//!   cargo run --example file-dump -- /dev/ttyUSB0 LOG.TXT > log.txt

use std::io::Write;

use pixxi::session::Session;
use pixxi::transport::SerialTransport;

const CHUNK: u16 = 256;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (port, name) = match (args.next(), args.next()) {
        (Some(port), Some(name)) => (port, name),
        _ => return Err("usage: file-dump <serial-port> <file>".into()),
    };

    let mut display = Session::new(SerialTransport::open_path(port)?);
    if display.file_mount()? == 0 {
        return Err("no card mounted".into());
    }

    let handle = display.file_open(&name, b'r')?;
    if handle == 0 {
        return Err(format!("cannot open {name}: error {}", display.file_error()?).into());
    }

    let size = display.file_size(handle)?;
    eprintln!("{name}: {} bytes", size.value);

    let mut out = std::io::stdout().lock();
    loop {
        let (count, data) = display.file_read(CHUNK, handle)?;
        out.write_all(&data[..usize::from(count).min(data.len())])?;
        if count < CHUNK {
            break;
        }
    }
    out.flush()?;

    display.file_close(handle)?;
    display.file_unmount()?;
    Ok(())
}
