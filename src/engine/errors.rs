use std::io;

use thiserror::Error;
use tokio::task::JoinError;

use crate::models::FilterError;
use crate::reader::ReadError;
use crate::storage::GatewayError;

/// A failure that ends an import. Row-level problems are never reported through this type.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read CSV header: input is empty")]
    MissingHeader,
    #[error("Failed to read CSV input after [{records_written}] records were written: {source}")]
    Read {
        records_written: usize,
        source: ReadError
    },
    #[error("Failed to write batch [{batch}] after [{records_written}] records were written: {source}")]
    Write {
        batch: usize,
        records_written: usize,
        source: GatewayError
    },
    #[error("Record reader task did not complete after [{records_written}] records were written: {source}")]
    ReaderTask {
        records_written: usize,
        source: JoinError
    }
}

impl ImportError {
    /// Records already persisted before the import stopped.
    pub fn records_written(&self) -> usize {
        match self {
            ImportError::Read { records_written, .. }
            | ImportError::Write { records_written, .. }
            | ImportError::ReaderTask { records_written, .. } => *records_written,
            ImportError::MissingHeader => 0
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format [{0}], expected [csv] or [json]")]
    UnknownFormat(String),
    #[error("Invalid export filter: {0}")]
    Filter(#[from] FilterError),
    #[error("Failed to read page at offset [{offset}]: {source}")]
    Read {
        offset: usize,
        source: GatewayError
    },
    #[error("Failed to encode CSV output: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write to output sink: {0}")]
    Sink(#[from] io::Error)
}
