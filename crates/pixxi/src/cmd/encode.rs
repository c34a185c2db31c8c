use pixxi_session::SessionError;
use serde::Serialize;

use crate::cmd::args::{borrow_args, parse_args};
use crate::cmd::{load_table, EncodeArgs};
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{hex, opcode_hex, print_json, print_raw, print_table, schema_id, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    schema_id: String,
    op: &'static str,
    opcode: String,
    len: usize,
    frame: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let table = load_table(&args.table)?;
    let desc = table.lookup(&args.op).ok_or_else(|| {
        session_error("encode", SessionError::UnknownOperation(args.op.clone()))
    })?;

    let owned = parse_args(desc, &args.args)?;
    let request = desc
        .encode(&borrow_args(&owned))
        .map_err(|err| session_error("encode", err))?;

    let out = EncodeOutput {
        schema_id: schema_id("encoded-request"),
        op: desc.name,
        opcode: opcode_hex(request.opcode()),
        len: request.len(),
        frame: hex(request.as_bytes()),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["OP", "OPCODE", "LEN", "FRAME"],
            vec![vec![
                out.op.to_string(),
                out.opcode.clone(),
                out.len.to_string(),
                out.frame.clone(),
            ]],
        ),
        OutputFormat::Pretty => println!("{} {} ({} bytes): {}", out.op, out.opcode, out.len, out.frame),
        OutputFormat::Raw => print_raw(request.as_bytes()),
    }

    Ok(SUCCESS)
}
