use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Subcommand};
use pixxi_session::{OpcodeOverrides, OperationTable, Session, SessionConfig};
use pixxi_transport::{ScriptedTransport, SerialConfig, SerialTransport};

use crate::exit::{session_error, transport_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod args;
pub mod call;
pub mod encode;
pub mod info;
pub mod ops;
pub mod ports;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the operation table.
    Ops(OpsArgs),
    /// Print the request frame for an operation without opening a port.
    Encode(EncodeArgs),
    /// Dispatch one operation and print the decoded reply.
    Call(CallArgs),
    /// Query model, firmware version and PmmC version of a display.
    Info(InfoArgs),
    /// List serial ports visible to the host.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Ops(args) => ops::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Call(args) => call::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Default)]
pub struct TableArgs {
    /// JSON file mapping operation names to opcodes.
    #[arg(long, env = "PIXXI_OPCODES", value_name = "FILE")]
    pub opcodes: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Serial device path (e.g. /dev/ttyUSB0, COM3).
    #[arg(long, short = 'p', env = "PIXXI_PORT")]
    pub port: Option<String>,
    /// Deadline for one exchange (e.g. 3s, 500ms).
    #[arg(long, env = "PIXXI_TIMEOUT", default_value = "3s")]
    pub timeout: String,
    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args, Debug)]
pub struct OpsArgs {
    /// Only list operations of this family (e.g. gfx, file, media).
    #[arg(long)]
    pub family: Option<String>,
    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub table: TableArgs,
    /// Operation name (e.g. gfx_Circle).
    pub op: String,
    /// Operation arguments, one per slot. Use `-` for a count to fill it from the run after it.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Answer the call from these reply bytes (hex) instead of a serial port.
    #[arg(long, value_name = "HEX", conflicts_with = "port")]
    pub dry_run: Option<String>,
    /// Operation name (e.g. gfx_Circle).
    pub op: String,
    /// Operation arguments, one per slot. Use `-` for a count to fill it from the run after it.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// The built-in table with any overrides from `--opcodes` applied.
pub fn load_table(args: &TableArgs) -> CliResult<OperationTable> {
    match &args.opcodes {
        Some(path) => load_overrides(path),
        None => Ok(OperationTable::builtin()),
    }
}

fn load_overrides(path: &Path) -> CliResult<OperationTable> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| CliError::usage(format!("read {}: {err}", path.display())))?;
    let overrides = OpcodeOverrides::from_json(&json)
        .map_err(|err| session_error(&format!("parse {}", path.display()), err))?;
    let table = OperationTable::with_overrides(&overrides)
        .map_err(|err| session_error(&format!("apply {}", path.display()), err))?;
    tracing::debug!(path = %path.display(), count = overrides.len(), "opcode overrides applied");
    Ok(table)
}

/// Open the serial link and wrap it in a session.
pub fn open_session(link: &LinkArgs) -> CliResult<Session<SerialTransport>> {
    let port = link
        .port
        .clone()
        .ok_or_else(|| CliError::usage("a serial port is required (--port or PIXXI_PORT)"))?;
    let timeout = parse_duration(&link.timeout)?;
    let table = load_table(&link.table)?;

    let config = SerialConfig::new(port);
    let transport =
        SerialTransport::open(config).map_err(|err| transport_error("open failed", err))?;

    Ok(Session::with_config(transport, SessionConfig::with_timeout(timeout)).with_table(table))
}

/// A session whose peer answers with `reply` and then falls silent.
pub fn scripted_session(link: &LinkArgs, reply: &[u8]) -> CliResult<Session<ScriptedTransport>> {
    let timeout = parse_duration(&link.timeout)?;
    let table = load_table(&link.table)?;
    let transport = ScriptedTransport::with_reply(reply);
    Ok(Session::with_config(transport, SessionConfig::with_timeout(timeout)).with_table(table))
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("timeout must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::usage(format!("invalid timeout value: {input}")))?;

    if value == 0 {
        return Err(CliError::usage("timeout must be greater than zero"));
    }

    if millis {
        Ok(Duration::from_millis(value))
    } else {
        Ok(Duration::from_secs(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("2").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn parse_duration_millis() {
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
    }

    #[test]
    fn parse_duration_invalid() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn load_table_without_overrides_is_builtin() {
        let table = load_table(&TableArgs::default()).unwrap();
        assert_eq!(table, OperationTable::builtin());
    }

    #[test]
    fn load_table_reports_missing_file() {
        let args = TableArgs {
            opcodes: Some(PathBuf::from("/nonexistent/pixxi-opcodes.json")),
        };
        let err = load_table(&args).unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);
    }
}
