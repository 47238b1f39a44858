//! Line oriented operation traces.
//!
//! Each line is `+ <key>` (insert), `? <key>` (query) or `#`, which ends the
//! trace. Blank lines are skipped. Leading whitespace is ignored, the first
//! character is the opcode and the key is the next whitespace delimited
//! token, so `+abc` and `+   abc` both insert `abc`.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;

pub const TERMINATOR: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Insert,
    Query,
    /// Kept in the trace but ignored on replay.
    Unrecognized(char),
}

impl From<char> for Opcode {
    fn from(symbol: char) -> Self {
        match symbol {
            '+' => Opcode::Insert,
            '?' => Opcode::Query,
            other => Opcode::Unrecognized(other),
        }
    }
}

impl Opcode {
    pub fn symbol(self: &Self) -> char {
        match self {
            Opcode::Insert => '+',
            Opcode::Query => '?',
            Opcode::Unrecognized(symbol) => *symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub opcode: Opcode,
    pub key: String,
}

impl Operation {
    pub fn insert(key: impl Into<String>) -> Self {
        Self {
            opcode: Opcode::Insert,
            key: key.into(),
        }
    }

    pub fn query(key: impl Into<String>) -> Self {
        Self {
            opcode: Opcode::Query,
            key: key.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Blank,
    Terminator,
    Operation(Operation),
}

pub fn parse_line(line: &str) -> Line {
    let mut chars = line.trim_start().chars();
    match chars.next() {
        None => Line::Blank,
        Some(TERMINATOR) => Line::Terminator,
        Some(symbol) => Line::Operation(Operation {
            opcode: Opcode::from(symbol),
            key: chars
                .as_str()
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        }),
    }
}

/// Reads operations up to the terminator or the end of input, whichever
/// comes first. Lines that are not valid UTF-8 are decoded lossily, invalid
/// bytes become U+FFFD in the key.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<Operation>> {
    let mut operations = vec![];
    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = match String::from_utf8(line) {
            Ok(line) => line,
            Err(invalid) => {
                warn!("line {} is not valid UTF-8, decoding lossily", number + 1);
                String::from_utf8_lossy(invalid.as_bytes()).into_owned()
            }
        };
        match parse_line(&line) {
            Line::Blank => continue,
            Line::Terminator => break,
            Line::Operation(op) => operations.push(op),
        }
    }
    debug!("parsed trace with {} operations", operations.len());
    Ok(operations)
}

pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}

/// Writes `operations` followed by the terminator line.
pub fn write_trace(mut writer: impl Write, operations: &[Operation]) -> Result<()> {
    for op in operations {
        writeln!(writer, "{} {}", op.opcode.symbol(), op.key)?;
    }
    writeln!(writer, "{}", TERMINATOR)?;
    writer.flush()?;
    Ok(())
}

/// One `Y` or `N` per query.
pub fn encode_answers(answers: &[bool]) -> String {
    answers
        .iter()
        .map(|answer| if *answer { 'Y' } else { 'N' })
        .collect()
}

pub fn write_answers(mut writer: impl Write, answers: &[bool]) -> Result<()> {
    writeln!(writer, "{}", encode_answers(answers))?;
    writer.flush()?;
    Ok(())
}
