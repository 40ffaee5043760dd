use std::{io, mem};

use csv::{Writer, WriterBuilder};

use crate::engine::errors::ExportError;
use crate::engine::ExportFormat;
use crate::mapping::{headers, values, Record, RecordView};

/// Encodes records into an in-memory buffer that is drained after every page.
///
/// The buffer never holds more than the output of one page, so the size of an export is
/// bounded only by the sink.
pub(super) enum RecordEncoder {
    Csv(Writer<Vec<u8>>),
    Json {
        buffer: Vec<u8>,
        elements: usize
    }
}

impl RecordEncoder {
    pub fn new(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => RecordEncoder::Csv(csv_writer()),
            ExportFormat::Json => RecordEncoder::Json { buffer: Vec::new(), elements: 0 }
        }
    }

    /// Writes what comes before the first record: the header row or the opening bracket.
    pub fn begin<R: Record>(&mut self) -> Result<(), ExportError> {
        match self {
            RecordEncoder::Csv(writer) => writer.write_record(headers::<R>())?,
            RecordEncoder::Json { buffer, .. } => buffer.push(b'[')
        }

        Ok(())
    }

    pub fn encode<R: Record>(&mut self, record: &R) -> Result<(), ExportError> {
        match self {
            RecordEncoder::Csv(writer) => {
                writer.write_record(values(record).map(|value| value.to_string()))?;
            },
            RecordEncoder::Json { buffer, elements } => {
                if *elements > 0 {
                    buffer.push(b',');
                }

                buffer.push(b'\n');
                serde_json::to_writer(&mut *buffer, &RecordView(record))?;
                *elements += 1;
            }
        }

        Ok(())
    }

    /// Writes what comes after the last record.
    pub fn finish(&mut self) {
        if let RecordEncoder::Json { buffer, elements } = self {
            if *elements > 0 {
                buffer.push(b'\n');
            }

            buffer.extend_from_slice(b"]\n");
        }
    }

    /// Drains everything encoded so far.
    pub fn take(&mut self) -> Result<Vec<u8>, ExportError> {
        match self {
            RecordEncoder::Csv(writer) => {
                mem::replace(writer, csv_writer())
                    .into_inner()
                    .map_err(|error| ExportError::Sink(io::Error::other(error.to_string())))
            },
            RecordEncoder::Json { buffer, .. } => Ok(mem::take(buffer))
        }
    }
}

fn csv_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new().from_writer(Vec::new())
}
