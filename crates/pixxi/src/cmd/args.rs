//! Command-line argument strings parsed into typed operation arguments.
//!
//! - word / count: decimal or `0x` hex; a count may be `-` to take the
//!   length of the run after it
//! - byte: a number, or a single non-digit character
//! - text: taken as-is
//! - word run: comma-separated words
//! - byte run, sector, pixels: hex digits, or `@path` to read a file

use std::path::Path;

use pixxi_session::{Arg, ArgShape, OpDescriptor};

use crate::exit::{CliError, CliResult};

/// An owned argument value, borrowed as an [`Arg`] at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedArg {
    Word(u16),
    Byte(u8),
    Text(String),
    Words(Vec<u16>),
    Bytes(Vec<u8>),
}

impl OwnedArg {
    pub fn as_arg(&self) -> Arg<'_> {
        match self {
            OwnedArg::Word(w) => Arg::Word(*w),
            OwnedArg::Byte(b) => Arg::Byte(*b),
            OwnedArg::Text(t) => Arg::Text(t),
            OwnedArg::Words(w) => Arg::Words(w),
            OwnedArg::Bytes(b) => Arg::Bytes(b),
        }
    }

    fn items(&self) -> Option<usize> {
        match self {
            OwnedArg::Words(w) => Some(w.len()),
            OwnedArg::Bytes(b) => Some(b.len()),
            _ => None,
        }
    }
}

/// Parse `raw` against the slots of `desc`.
pub fn parse_args(desc: &OpDescriptor, raw: &[String]) -> CliResult<Vec<OwnedArg>> {
    if raw.len() != desc.args.len() {
        return Err(CliError::usage(format!(
            "{} takes {} arguments ({}), got {}",
            desc.name,
            desc.args.len(),
            signature(desc.args),
            raw.len()
        )));
    }

    let mut parsed = Vec::with_capacity(raw.len());
    let mut pending = Vec::new();
    for (index, (shape, value)) in desc.args.iter().zip(raw).enumerate() {
        if *shape == ArgShape::Count && value == "-" {
            pending.push(index);
            parsed.push(OwnedArg::Word(0));
            continue;
        }
        let arg = parse_one(*shape, value)
            .map_err(|reason| CliError::usage(format!("{} argument {index}: {reason}", desc.name)))?;
        parsed.push(arg);
    }

    for index in pending {
        let items = parsed[index + 1..]
            .iter()
            .find_map(OwnedArg::items)
            .ok_or_else(|| {
                CliError::usage(format!("{} argument {index}: no run follows this count", desc.name))
            })?;
        let count = u16::try_from(items).map_err(|_| {
            CliError::usage(format!("{} argument {index}: run of {items} items is too long", desc.name))
        })?;
        parsed[index] = OwnedArg::Word(count);
    }

    Ok(parsed)
}

/// Borrow a parsed argument list for dispatch.
pub fn borrow_args(args: &[OwnedArg]) -> Vec<Arg<'_>> {
    args.iter().map(OwnedArg::as_arg).collect()
}

pub fn signature(shapes: &[ArgShape]) -> String {
    if shapes.is_empty() {
        return "none".to_string();
    }
    shapes
        .iter()
        .map(|s| match s {
            ArgShape::Word => "word",
            ArgShape::Byte => "byte",
            ArgShape::Text => "text",
            ArgShape::Count => "count",
            ArgShape::Words => "words",
            ArgShape::Bytes => "bytes",
            ArgShape::Sector => "sector",
            ArgShape::Pixels => "pixels",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_one(shape: ArgShape, value: &str) -> Result<OwnedArg, String> {
    match shape {
        ArgShape::Word | ArgShape::Count => parse_word(value).map(OwnedArg::Word),
        ArgShape::Byte => parse_byte(value).map(OwnedArg::Byte),
        ArgShape::Text => Ok(OwnedArg::Text(value.to_string())),
        ArgShape::Words => parse_words(value).map(OwnedArg::Words),
        ArgShape::Bytes | ArgShape::Sector | ArgShape::Pixels => {
            parse_blob(value).map(OwnedArg::Bytes)
        }
    }
}

fn parse_number(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| format!("invalid number: {value:?}"))
}

pub fn parse_word(value: &str) -> Result<u16, String> {
    let n = parse_number(value)?;
    u16::try_from(n).map_err(|_| format!("{n} does not fit in a word"))
}

pub fn parse_byte(value: &str) -> Result<u8, String> {
    let mut chars = value.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii() && !c.is_ascii_digit() {
            return Ok(c as u8);
        }
    }
    let n = parse_number(value)?;
    u8::try_from(n).map_err(|_| format!("{n} does not fit in a byte"))
}

fn parse_words(value: &str) -> Result<Vec<u16>, String> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value.split(',').map(parse_word).collect()
}

fn parse_blob(value: &str) -> Result<Vec<u8>, String> {
    if let Some(path) = value.strip_prefix('@') {
        return std::fs::read(Path::new(path)).map_err(|err| format!("read {path}: {err}"));
    }
    parse_hex(value)
}

pub fn parse_hex(value: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = value
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err("hex data must have an even number of digits".to_string());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|_| "invalid hex data".to_string())?;
            u8::from_str_radix(text, 16).map_err(|_| format!("invalid hex byte: {text:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pixxi_session::{Op, OperationTable};

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn words_accept_decimal_and_hex() {
        assert_eq!(parse_word("42"), Ok(42));
        assert_eq!(parse_word("0xF800"), Ok(0xF800));
        assert!(parse_word("65536").is_err());
        assert!(parse_word("-1").is_err());
    }

    #[test]
    fn bytes_accept_characters_and_numbers() {
        assert_eq!(parse_byte("A"), Ok(b'A'));
        assert_eq!(parse_byte("7"), Ok(7));
        assert_eq!(parse_byte("0x0d"), Ok(0x0D));
        assert!(parse_byte("300").is_err());
    }

    #[test]
    fn hex_ignores_separators() {
        assert_eq!(parse_hex("de ad:be ef"), Ok(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn circle_parses_four_words() {
        let table = OperationTable::builtin();
        let desc = table.get(Op::GfxCircle);
        let args = parse_args(desc, &strings(&["10", "20", "5", "0xF800"])).unwrap();
        assert_eq!(
            args,
            vec![
                OwnedArg::Word(10),
                OwnedArg::Word(20),
                OwnedArg::Word(5),
                OwnedArg::Word(0xF800)
            ]
        );
    }

    #[test]
    fn dash_count_takes_following_run_length() {
        let table = OperationTable::builtin();
        let desc = table.get(Op::GfxPolyline);
        let args = parse_args(desc, &strings(&["-", "1,2,3", "4,5,6", "0xFFFF"])).unwrap();
        assert_eq!(args[0], OwnedArg::Word(3));
        assert_eq!(args[1], OwnedArg::Words(vec![1, 2, 3]));
        assert!(desc.encode(&borrow_args(&args)).is_ok());
    }

    #[test]
    fn wrong_arity_is_usage_error() {
        let table = OperationTable::builtin();
        let desc = table.get(Op::GfxCircle);
        let err = parse_args(desc, &strings(&["10"])).unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);
        assert!(err.message.contains("word, word, word, word"));
    }

    #[test]
    fn signature_of_no_arguments() {
        assert_eq!(signature(&[]), "none");
    }
}
