use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::engine::errors::ImportError;
use crate::engine::{DEFAULT_BACKPRESSURE, DEFAULT_BATCH_SIZE};
use crate::mapping::{ConversionError, HeaderLayout};
use crate::models::Transaction;
use crate::reader::{ReadError, RecordReader};
use crate::storage::TransactionGateway;

type RowResult = Result<Vec<String>, ReadError>;

/// A data row that could not be converted and was left out of every batch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SkippedRow {
    /// 1-based index of the data row, not counting the header.
    pub row: usize,
    pub reason: ConversionError
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ImportReport {
    pub rows_read: usize,
    pub records_written: usize,
    pub batches_written: usize,
    pub skipped: Vec<SkippedRow>
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Streams CSV rows into the gateway in fixed-size batches.
pub struct ImportPipeline<G: TransactionGateway> {
    gateway: Arc<G>,
    batch_size: usize,
    backpressure: usize
}

impl<G: TransactionGateway> ImportPipeline<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            batch_size: DEFAULT_BATCH_SIZE,
            backpressure: DEFAULT_BACKPRESSURE
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Maximum number of rows read ahead of conversion and persistence.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Imports every row of `reader`.
    ///
    /// Rows that fail conversion are skipped and listed in the report. An empty stream, a read
    /// failure or a failed batch write ends the import; batches written before that point stay
    /// written and their count is carried by the error. A fatal error is returned without
    /// waiting for the reader thread, which may still be blocked on a stalled source.
    pub async fn process_stream<R: RecordReader>(&self, reader: R) -> Result<ImportReport, ImportError> {
        let (sender, receiver) = mpsc::channel::<RowResult>(self.backpressure);
        let reader_handle = spawn_record_reader(reader, sender);

        match self.consume(receiver).await {
            //NOTE: The channel is closed by now, so the reader task has already returned or panicked
            Ok(report) => match reader_handle.await {
                Ok(()) => Ok(report),
                Err(source) => Err(reader_task_failed(report.records_written, source))
            },
            Err(ImportError::MissingHeader) => match reader_handle.await {
                Ok(()) => Err(ImportError::MissingHeader),
                Err(source) => Err(reader_task_failed(0, source))
            },
            //NOTE: Dropping the receiver stops the detached reader after its next read
            Err(error) => {
                error!("Import aborted: {error}");
                Err(error)
            }
        }
    }

    async fn consume(&self, mut receiver: mpsc::Receiver<RowResult>) -> Result<ImportReport, ImportError> {
        let header = match receiver.recv().await {
            Some(Ok(header)) => header,
            Some(Err(source)) => return Err(ImportError::Read { records_written: 0, source }),
            None => return Err(ImportError::MissingHeader)
        };

        let layout = HeaderLayout::<Transaction>::resolve(&header);

        for column in layout.unknown_columns() {
            warn!("Header column [{column}] does not match any transaction field, every row will be skipped");
        }

        for column in layout.missing_columns() {
            warn!("Required column [{column}] is missing from the header, every row will be skipped");
        }

        let mut report = ImportReport::default();
        let mut batch = Vec::with_capacity(self.batch_size);

        while let Some(result) = receiver.recv().await {
            let fields = result.map_err(|source| ImportError::Read {
                records_written: report.records_written,
                source
            })?;

            report.rows_read += 1;

            match layout.convert(&fields) {
                Ok(transaction) => {
                    batch.push(transaction);

                    if batch.len() >= self.batch_size {
                        self.flush(&mut batch, &mut report).await?;
                    }
                },
                Err(reason) => {
                    warn!("Skipping row [{}]: {reason}", report.rows_read);
                    report.skipped.push(SkippedRow { row: report.rows_read, reason });
                }
            }
        }

        if !batch.is_empty() {
            self.flush(&mut batch, &mut report).await?;
        }

        info!(
            "Imported [{}] of [{}] rows in [{}] batches, [{}] skipped",
            report.records_written, report.rows_read, report.batches_written, report.skipped.len()
        );

        Ok(report)
    }

    async fn flush(&self, batch: &mut Vec<Transaction>, report: &mut ImportReport) -> Result<(), ImportError> {
        let number = report.batches_written + 1;

        self.gateway.write_batch(batch).await.map_err(|source| ImportError::Write {
            batch: number,
            records_written: report.records_written,
            source
        })?;

        debug!("Batch [{number}] of [{}] transactions written", batch.len());

        report.records_written += batch.len();
        report.batches_written = number;
        batch.clear();

        Ok(())
    }
}

fn reader_task_failed(records_written: usize, source: JoinError) -> ImportError {
    error!("Record reader task failed: {source}");
    ImportError::ReaderTask { records_written, source }
}

/// Drives the blocking reader on its own thread, handing rows over through a bounded channel.
///
/// The header is the first message. The channel closes at end-of-stream, after the first
/// read error, or as soon as the receiving side is dropped.
fn spawn_record_reader<R: RecordReader>(mut reader: R, sender: mpsc::Sender<RowResult>) -> JoinHandle<()> {
    spawn_blocking(move || {
        match reader.read_header() {
            Ok(Some(header)) => {
                if sender.blocking_send(Ok(header)).is_err() {
                    return;
                }
            },
            Ok(None) => return,
            Err(error) => {
                let _ = sender.blocking_send(Err(error));
                return;
            }
        }

        loop {
            let result = match reader.read_record() {
                Ok(Some(fields)) => Ok(fields),
                Ok(None) => break,
                Err(error) => Err(error)
            };

            let failed = result.is_err();

            if sender.blocking_send(result).is_err() || failed {
                break;
            }
        }
    })
}
