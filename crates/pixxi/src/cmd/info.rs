use serde::Serialize;

use crate::cmd::{open_session, InfoArgs};
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{opcode_hex, print_json, print_table, schema_id, OutputFormat};

#[derive(Serialize)]
struct InfoOutput {
    schema_id: String,
    port: String,
    model: String,
    firmware_version: u16,
    pmmc_version: u16,
    connected: bool,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = open_session(&args.link)?;

    let model = session
        .sys_get_model()
        .map_err(|err| session_error("sys_GetModel", err))?;
    let firmware_version = session
        .sys_get_version()
        .map_err(|err| session_error("sys_GetVersion", err))?;
    let pmmc_version = session
        .sys_get_pmmc()
        .map_err(|err| session_error("sys_GetPmmC", err))?;

    let out = InfoOutput {
        schema_id: schema_id("display-info"),
        port: args.link.port.unwrap_or_default(),
        model,
        firmware_version,
        pmmc_version,
        connected: true,
    };

    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_table(
            &["PORT", "MODEL", "FIRMWARE", "PMMC"],
            vec![vec![
                out.port.clone(),
                out.model.clone(),
                opcode_hex(out.firmware_version),
                opcode_hex(out.pmmc_version),
            ]],
        ),
        OutputFormat::Pretty => {
            println!("Display Info:");
            println!("  Port:      {}", out.port);
            println!("  Model:     {}", out.model);
            println!("  Firmware:  {}", opcode_hex(out.firmware_version));
            println!("  PmmC:      {}", opcode_hex(out.pmmc_version));
        }
        OutputFormat::Raw => println!("{}", out.model),
    }
}
