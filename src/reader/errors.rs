use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O failure while reading input: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed input at line [{line}]: {message}")]
    Malformed {
        line: u64,
        message: String
    }
}

impl From<csv::Error> for ReadError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|position| position.line()).unwrap_or_default();
        let message = error.to_string();

        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::Io(source),
            _ => Self::Malformed { line, message }
        }
    }
}
