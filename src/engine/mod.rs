mod encoder;
mod errors;
mod export;
mod import;

pub use export::{ExportFormat, ExportPipeline, ExportSummary};
pub use import::{ImportPipeline, ImportReport};

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 500;
pub const DEFAULT_BACKPRESSURE: usize = 256;
