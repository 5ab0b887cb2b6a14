use std::io::{self, Write};

/// Receives everything a running program emits.
pub trait Output {
    /// Value printed by a PRN instruction.
    fn value(&mut self, value: u8) -> io::Result<()>;

    /// Diagnostic marker emitted by ALU instructions.
    fn marker(&mut self, marker: &str) -> io::Result<()>;

    /// Report for a byte that does not decode to an instruction.
    fn unknown_opcode(&mut self, opcode: u8) -> io::Result<()>;
}

/// Writes one line per event to `W`, flushing after each.
#[derive(Debug)]
pub struct WriterOutput<W: Write> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.writer.write_fmt(args)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> Output for WriterOutput<W> {
    fn value(&mut self, value: u8) -> io::Result<()> {
        self.line(format_args!("{}", value))
    }

    fn marker(&mut self, marker: &str) -> io::Result<()> {
        self.line(format_args!("{}", marker))
    }

    fn unknown_opcode(&mut self, opcode: u8) -> io::Result<()> {
        self.line(format_args!("unknown opcode 0x{:02X}", opcode))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputEvent {
    Value(u8),
    Marker(String),
    UnknownOpcode(u8),
}

/// Keeps every event in memory instead of writing it anywhere.
#[derive(Clone, Debug, Default)]
pub struct RecordingOutput {
    events: Vec<OutputEvent>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    /// Only the values printed by PRN, in order.
    pub fn values(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                OutputEvent::Value(value) => Some(*value),
                _ => None,
            })
            .collect()
    }
}

impl Output for RecordingOutput {
    fn value(&mut self, value: u8) -> io::Result<()> {
        self.events.push(OutputEvent::Value(value));
        Ok(())
    }

    fn marker(&mut self, marker: &str) -> io::Result<()> {
        self.events.push(OutputEvent::Marker(String::from(marker)));
        Ok(())
    }

    fn unknown_opcode(&mut self, opcode: u8) -> io::Result<()> {
        self.events.push(OutputEvent::UnknownOpcode(opcode));
        Ok(())
    }
}
