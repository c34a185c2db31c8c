use pixxi_transport::{available_ports, PortInfo};
use serde::Serialize;

use crate::cmd::PortsArgs;
use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, schema_id, OutputFormat};

#[derive(Serialize)]
struct PortEntry {
    name: String,
    kind: &'static str,
    product: Option<String>,
}

impl From<PortInfo> for PortEntry {
    fn from(info: PortInfo) -> Self {
        Self {
            name: info.name,
            kind: info.kind,
            product: info.product,
        }
    }
}

#[derive(Serialize)]
struct PortsOutput {
    schema_id: String,
    ports: Vec<PortEntry>,
}

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports: Vec<PortEntry> = available_ports()
        .map_err(|err| transport_error("port enumeration failed", err))?
        .into_iter()
        .map(PortEntry::from)
        .collect();

    match format {
        OutputFormat::Json => print_json(&PortsOutput {
            schema_id: schema_id("serial-ports"),
            ports,
        }),
        OutputFormat::Table => print_table(
            &["PORT", "KIND", "PRODUCT"],
            ports
                .into_iter()
                .map(|p| vec![p.name, p.kind.to_string(), p.product.unwrap_or_default()])
                .collect(),
        ),
        OutputFormat::Pretty => {
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for p in &ports {
                match &p.product {
                    Some(product) => println!("{} ({}, {})", p.name, p.kind, product),
                    None => println!("{} ({})", p.name, p.kind),
                }
            }
        }
        OutputFormat::Raw => {
            for p in &ports {
                println!("{}", p.name);
            }
        }
    }

    Ok(SUCCESS)
}
