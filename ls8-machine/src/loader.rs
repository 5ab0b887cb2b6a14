use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: '{text}' is not an 8-bit binary literal")]
    InvalidLiteral { line: usize, text: String },
    #[error("program is {len} bytes but memory only holds {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;

const MAX_LITERAL_DIGITS: usize = 8;

/// Parses a program image: one base-2 byte literal of at most eight digits
/// per line, `#` starts a comment, blank and comment-only lines are skipped.
pub fn parse_program(text: &str) -> Result<Vec<u8>> {
    let mut program = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let literal = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if literal.is_empty() {
            continue;
        }

        let invalid = || LoadError::InvalidLiteral {
            line: idx + 1,
            text: String::from(literal),
        };
        let is_binary = literal.bytes().all(|b| b == b'0' || b == b'1');
        if literal.len() > MAX_LITERAL_DIGITS || !is_binary {
            return Err(invalid());
        }
        let byte = u8::from_str_radix(literal, 2).map_err(|_| invalid())?;
        program.push(byte);
    }
    tracing::debug!("parsed {} byte program image", program.len());
    Ok(program)
}
