use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::engine::encoder::RecordEncoder;
use crate::engine::errors::ExportError;
use crate::engine::DEFAULT_PAGE_SIZE;
use crate::models::{Transaction, TransactionFilter};
use crate::storage::TransactionGateway;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExportFormat {
    /// Header row followed by one row per transaction.
    Csv,
    /// One array of objects keyed by column name.
    Json
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json"
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "transactions.csv",
            ExportFormat::Json => "transactions.json"
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name())
    }
}

impl Display for ExportFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => formatter.write_str("csv"),
            ExportFormat::Json => formatter.write_str("json")
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnknownFormat(value.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ExportSummary {
    /// Gateway calls made, including the final empty page.
    pub pages_fetched: usize,
    pub records_written: usize
}

/// Pages filtered transactions out of the gateway and streams them to a sink.
pub struct ExportPipeline<G: TransactionGateway> {
    gateway: Arc<G>,
    page_size: usize
}

impl<G: TransactionGateway> ExportPipeline<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            page_size: DEFAULT_PAGE_SIZE
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Writes every transaction matching `filter` to `sink` in the given format.
    ///
    /// An invalid filter is rejected before the gateway or the sink is touched. Each page is
    /// encoded and written before the next one is requested, so memory use is bounded by the
    /// page size. If a later page fails, whatever was already written stays in the sink.
    pub async fn export<W>(&self, format: ExportFormat, filter: &TransactionFilter, sink: &mut W) -> Result<ExportSummary, ExportError>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        filter.validate()?;

        let mut encoder = RecordEncoder::new(format);
        let mut summary = ExportSummary::default();
        let mut offset = 0;

        encoder.begin::<Transaction>()?;
        sink.write_all(&encoder.take()?).await?;

        loop {
            let page = self.gateway.get_page(filter, self.page_size, offset).await
                .map_err(|source| ExportError::Read { offset, source })?;

            summary.pages_fetched += 1;

            if page.is_empty() {
                break;
            }

            for transaction in &page {
                encoder.encode(transaction)?;
            }

            sink.write_all(&encoder.take()?).await?;

            debug!("Exported page at offset [{offset}] with [{}] transactions", page.len());

            summary.records_written += page.len();
            offset += self.page_size;
        }

        encoder.finish();
        sink.write_all(&encoder.take()?).await?;
        sink.flush().await?;

        info!("Exported [{}] transactions as [{format}] in [{}] pages", summary.records_written, summary.pages_fetched);

        Ok(summary)
    }
}
