use pixxi_frame::{decode_text, Reply};
use pixxi_session::{ReplySpec, Session, SessionError};
use pixxi_transport::Transport;
use serde::Serialize;

use crate::cmd::args::{borrow_args, parse_args, parse_hex};
use crate::cmd::{open_session, scripted_session, CallArgs};
use crate::exit::{session_error, CliError, CliResult, SUCCESS};
use crate::output::{
    hex, opcode_hex, payload_preview, print_json, print_raw, print_table, schema_id, OutputFormat,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReplyView {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<[u16; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ReplyView {
    pub fn new(reply: &Reply, spec: ReplySpec) -> Self {
        let mut view = ReplyView {
            kind: "ack",
            result: reply.result(),
            words: None,
            payload: None,
            text: None,
        };
        match reply {
            Reply::Ack => {}
            Reply::Word(_) => view.kind = "word",
            Reply::TwoWords(first, second) => {
                view.kind = "two_words";
                view.result = None;
                view.words = Some([*first, *second]);
            }
            Reply::WordTwoWords { first, second, .. } => {
                view.kind = "word_two_words";
                view.words = Some([*first, *second]);
            }
            Reply::Blob { payload, .. } => {
                view.kind = "blob";
                if spec == ReplySpec::Text {
                    view.text = Some(decode_text(payload));
                } else {
                    view.payload = Some(hex(payload));
                }
            }
        }
        view
    }

    fn summary(&self) -> String {
        let mut parts = vec![self.kind.to_string()];
        if let Some(result) = self.result {
            parts.push(format!("result={result}"));
        }
        if let Some([first, second]) = self.words {
            parts.push(format!("words={first},{second}"));
        }
        if let Some(text) = &self.text {
            parts.push(format!("text={text:?}"));
        }
        if let Some(payload) = &self.payload {
            parts.push(format!("payload={payload}"));
        }
        parts.join(" ")
    }
}

#[derive(Serialize)]
struct CallOutput {
    schema_id: String,
    op: &'static str,
    opcode: String,
    reply: ReplyView,
}

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    match &args.dry_run {
        Some(reply) => {
            let reply = parse_hex(reply)
                .map_err(|reason| CliError::usage(format!("--dry-run: {reason}")))?;
            let mut session = scripted_session(&args.link, &reply)?;
            let code = execute(&mut session, &args, format)?;
            tracing::debug!(
                written = %hex(session.get_ref().written()),
                unread = session.get_ref().pending(),
                "dry run finished"
            );
            Ok(code)
        }
        None => execute(&mut open_session(&args.link)?, &args, format),
    }
}

fn execute<T: Transport>(
    session: &mut Session<T>,
    args: &CallArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    let desc = *session.table().lookup(&args.op).ok_or_else(|| {
        session_error("call", SessionError::UnknownOperation(args.op.clone()))
    })?;

    let owned = parse_args(&desc, &args.args)?;
    let reply = session
        .call(desc.op, &borrow_args(&owned))
        .map_err(|err| session_error(desc.name, err))?;

    if let OutputFormat::Raw = format {
        match &reply {
            Reply::Blob { payload, .. } => print_raw(payload),
            other => {
                if let Some(result) = other.result() {
                    println!("{result}");
                }
            }
        }
        return Ok(SUCCESS);
    }

    let out = CallOutput {
        schema_id: schema_id("call-reply"),
        op: desc.name,
        opcode: opcode_hex(desc.opcode),
        reply: ReplyView::new(&reply, desc.reply),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let detail = match (&out.reply.text, &reply) {
                (Some(text), _) => text.clone(),
                (None, Reply::Blob { payload, .. }) => payload_preview(payload),
                _ => out.reply.summary(),
            };
            print_table(
                &["OP", "OPCODE", "REPLY", "DETAIL"],
                vec![vec![
                    out.op.to_string(),
                    out.opcode.clone(),
                    out.reply.kind.to_string(),
                    detail,
                ]],
            );
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!("{} {}: {}", out.op, out.opcode, out.reply.summary());
        }
    }

    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn text_blob_is_decoded() {
        let reply = Reply::Blob {
            result: 6,
            payload: Bytes::from_static(b"uLCD\0\0"),
        };
        let view = ReplyView::new(&reply, ReplySpec::Text);
        assert_eq!(view.text.as_deref(), Some("uLCD"));
        assert_eq!(view.payload, None);
        assert_eq!(view.result, Some(6));
    }

    #[test]
    fn data_blob_is_hex() {
        let reply = Reply::Blob {
            result: 2,
            payload: Bytes::from_static(&[0xAB, 0x01]),
        };
        let view = ReplyView::new(&reply, ReplySpec::DataSizedBy(0));
        assert_eq!(view.payload.as_deref(), Some("ab 01"));
    }

    #[test]
    fn two_words_have_no_result() {
        let view = ReplyView::new(&Reply::TwoWords(3, 4), ReplySpec::AckTwoWords);
        assert_eq!(view.result, None);
        assert_eq!(view.words, Some([3, 4]));
        assert_eq!(view.summary(), "two_words words=3,4");
    }

    #[test]
    fn json_omits_empty_fields() {
        let view = ReplyView::new(&Reply::Word(42), ReplySpec::AckWord);
        let json = serde_json::to_string(&view).expect("reply view should serialize");
        assert_eq!(json, r#"{"kind":"word","result":42}"#);
    }
}
