use thiserror::Error;

use crate::types::FieldError;

/// Why a single raw row could not become a record. Never fatal to the stream.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConversionError {
    #[error("Header column [{column}] does not match any known field")]
    UnknownColumn {
        column: String
    },
    #[error("Required column [{column}] is missing from the header")]
    MissingColumn {
        column: &'static str
    },
    #[error("Row has [{found}] fields but the header declares [{expected}]")]
    FieldCount {
        expected: usize,
        found: usize
    },
    #[error("Error parsing column [{column}]: {source}")]
    Field {
        column: &'static str,
        source: FieldError
    }
}
