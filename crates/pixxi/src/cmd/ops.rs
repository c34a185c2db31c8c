use pixxi_session::{OpDescriptor, ReplySpec};
use serde::Serialize;

use crate::cmd::args::signature;
use crate::cmd::{load_table, OpsArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{opcode_hex, print_json, print_table, schema_id, OutputFormat};

#[derive(Serialize)]
struct OpsOutput<'a> {
    schema_id: String,
    count: usize,
    operations: Vec<&'a OpDescriptor>,
}

pub fn run(args: OpsArgs, format: OutputFormat) -> CliResult<i32> {
    let table = load_table(&args.table)?;
    let operations: Vec<&OpDescriptor> = table
        .iter()
        .filter(|desc| match &args.family {
            Some(family) => family_of(desc.name).eq_ignore_ascii_case(family),
            None => true,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&OpsOutput {
            schema_id: schema_id("operation-table"),
            count: operations.len(),
            operations,
        }),
        OutputFormat::Table => print_table(
            &["NAME", "OPCODE", "ARGS", "REPLY"],
            operations
                .iter()
                .map(|desc| {
                    vec![
                        desc.name.to_string(),
                        opcode_hex(desc.opcode),
                        signature(desc.args),
                        reply_name(desc.reply),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for desc in &operations {
                println!(
                    "{:<28} {}  ({}) -> {}",
                    desc.name,
                    opcode_hex(desc.opcode),
                    signature(desc.args),
                    reply_name(desc.reply)
                );
            }
        }
        OutputFormat::Raw => {
            for desc in &operations {
                println!("{}", desc.name);
            }
        }
    }

    Ok(SUCCESS)
}

/// Family prefix of an operation name: `gfx_Circle` is `gfx`.
pub fn family_of(name: &str) -> &str {
    match name.split_once('_') {
        Some((family, _)) => family,
        None => "misc",
    }
}

fn reply_name(reply: ReplySpec) -> String {
    match reply {
        ReplySpec::Ack => "ack".to_string(),
        ReplySpec::AckWord => "ack+word".to_string(),
        ReplySpec::AckTwoWords => "ack+2 words".to_string(),
        ReplySpec::AckWordTwoWords => "ack+word+2 words".to_string(),
        ReplySpec::Sector => "ack+word+sector".to_string(),
        ReplySpec::Text => "ack+string".to_string(),
        ReplySpec::DataSizedBy(index) => format!("ack+word+data(arg {index})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_is_name_prefix() {
        assert_eq!(family_of("gfx_Circle"), "gfx");
        assert_eq!(family_of("file_LoadImageControl"), "file");
        assert_eq!(family_of("putCH"), "misc");
    }

    #[test]
    fn reply_names_are_distinct() {
        assert_eq!(reply_name(ReplySpec::Ack), "ack");
        assert_eq!(reply_name(ReplySpec::DataSizedBy(0)), "ack+word+data(arg 0)");
    }
}
