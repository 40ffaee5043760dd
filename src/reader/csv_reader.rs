use std::io::Read;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::reader::errors::ReadError;
use crate::reader::RecordReader;

/// Reads CSV rows one at a time from any byte source.
///
/// The header is returned as an ordinary row by [`RecordReader::read_header`] rather than being
/// consumed by the csv crate, and rows may have any number of fields: checking a row against
/// the header is a per-row conversion concern, not a read failure.
pub struct CsvRecordReader<R> {
    reader: Reader<R>,
    record: StringRecord
}

impl<R: Read> CsvRecordReader<R> {
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            record: StringRecord::new()
        }
    }

    fn next_row(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None)
        }

        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }
}

impl<R: Read + Send + 'static> RecordReader for CsvRecordReader<R> {
    fn read_header(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        self.next_row()
    }

    fn read_record(&mut self) -> Result<Option<Vec<String>>, ReadError> {
        self.next_row()
    }
}
