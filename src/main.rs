mod engine;
mod mapping;
mod models;
mod reader;
mod storage;
mod types;

use std::fs::File;
use std::io::{stderr, BufReader};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{
    ExportFormat, ExportPipeline, ExportSummary, ImportPipeline, ImportReport,
    DEFAULT_BACKPRESSURE, DEFAULT_BATCH_SIZE, DEFAULT_PAGE_SIZE
};
use crate::models::{FilterParams, TransactionFilter};
use crate::reader::CsvRecordReader;
use crate::storage::TransactionStorage;

struct Arguments {
    path: String,
    format: ExportFormat,
    log_level: LevelFilter,
    filter: FilterParams,
    batch_size: usize,
    page_size: usize,
    backpressure: usize
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: transaction-stream-engine [input].csv [csv|json:optional] [log_level:optional] [filter=value ...] > [output]");
        eprintln!("Available formats: csv, json (default: csv)");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Available filters: transaction_id, terminal_id, status, payment_narrative, date_from, date_to");
        eprintln!("Tuning: batch_size={DEFAULT_BATCH_SIZE}, page_size={DEFAULT_PAGE_SIZE}, backpressure={DEFAULT_BACKPRESSURE}");
        exit(1);
    }

    let arguments = parse_arguments(&args[1..])?;

    setup_logging(arguments.log_level);

    let filter = TransactionFilter::try_from(arguments.filter)?;
    let storage = Arc::new(TransactionStorage::new());

    let file = File::open(&arguments.path)
        .with_context(|| format!("Error opening CSV at path: {}", arguments.path))?;

    let timer = Instant::now();
    let result = ImportPipeline::new(storage.clone())
        .with_batch_size(arguments.batch_size)
        .with_backpressure(arguments.backpressure)
        .process_stream(CsvRecordReader::new(BufReader::new(file)))
        .await;

    let report = match result {
        Ok(report) => report,
        Err(error) => {
            error!("Import stopped with [{}] transactions already persisted", error.records_written());
            return Err(error.into());
        }
    };

    info!("Imported transactions in: {:?}", timer.elapsed());
    log_import_report(&report, &storage);

    info!(
        "Exporting as [{}] with disposition [{}]",
        arguments.format.content_type(),
        arguments.format.content_disposition()
    );

    let mut output = tokio::io::stdout();
    let summary = ExportPipeline::new(storage)
        .with_page_size(arguments.page_size)
        .export(arguments.format, &filter, &mut output)
        .await?;

    log_export_summary(&summary);

    Ok(())
}

fn log_import_report(report: &ImportReport, storage: &TransactionStorage) {
    if !report.is_clean() {
        warn!("[{}] rows were skipped:", report.skipped.len());

        for skipped in &report.skipped {
            warn!("Row [{}]: {}", skipped.row, skipped.reason);
        }
    }

    if storage.is_empty() {
        warn!("No transactions were imported, the export will be empty");
    } else {
        info!("Storage holds [{}] transactions", storage.len());
    }
}

fn log_export_summary(summary: &ExportSummary) {
    info!("Wrote [{}] transactions from [{}] pages", summary.records_written, summary.pages_fetched);
}

fn parse_arguments(args: &[String]) -> Result<Arguments> {
    let mut arguments = Arguments {
        path: args[0].clone(),
        format: ExportFormat::Csv,
        log_level: LevelFilter::ERROR,
        filter: FilterParams::default(),
        batch_size: DEFAULT_BATCH_SIZE,
        page_size: DEFAULT_PAGE_SIZE,
        backpressure: DEFAULT_BACKPRESSURE
    };

    for (position, arg) in args.iter().enumerate().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            match key {
                "batch_size" => arguments.batch_size = parse_size(key, value)?,
                "page_size" => arguments.page_size = parse_size(key, value)?,
                "backpressure" => arguments.backpressure = parse_size(key, value)?,
                _ => arguments.filter.set(key, value)?
            }
            continue;
        }

        match arg.parse::<ExportFormat>() {
            Ok(format) if position == 1 => arguments.format = format,
            _ => arguments.log_level = parse_log_level(arg)
        }
    }

    Ok(arguments)
}

fn parse_size(key: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>()
        .with_context(|| format!("Invalid value for [{key}]: {value}"))
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the export, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
