mod csv_reader;
mod errors;

pub use csv_reader::CsvRecordReader;
pub use errors::ReadError;

/// A single-owner cursor over a stream of tabular rows.
///
/// `Ok(None)` signals end-of-stream and is the normal way for callers to stop reading.
/// Implementations block on their underlying source; callers on an async runtime should drive
/// them from a blocking task.
pub trait RecordReader: Send + 'static {
    fn read_header(&mut self) -> Result<Option<Vec<String>>, ReadError>;
    fn read_record(&mut self) -> Result<Option<Vec<String>>, ReadError>;
}
