use crate::error::CfResult;
use crate::solver::{EventSink, SolverEvent};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::warn;

/// Inbound messages, tagged by `cmd` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
    Start { cipher_text: String },
}

impl Command {
    pub fn start(cipher_text: impl Into<String>) -> Self {
        Command::Start {
            cipher_text: cipher_text.into(),
        }
    }
}

/// `Ok(None)` for well-formed JSON that isn't a command we accept.
pub fn parse_command(payload: &str) -> CfResult<Option<Command>> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    Ok(serde_json::from_value(value).ok())
}

pub fn encode_event(event: &SolverEvent) -> CfResult<String> {
    Ok(serde_json::to_string(event)?)
}

/// Writes each event as one line of JSON and flushes.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    failed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &SolverEvent) -> CfResult<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn on_event(&mut self, event: SolverEvent) {
        if let Err(e) = self.write_event(&event) {
            if !self.failed {
                warn!("Dropping events, output is not writable: {}", e);
                self.failed = true;
            }
        }
    }
}
