/*!
 * projdump - Flatten a project directory into a single text dump
 *
 * Walks a project tree, keeps the files whose extension, name and path pass
 * the configured filters, and concatenates them with header banners into one
 * document that is written to disk and copied to the clipboard.
 */

use std::sync::Arc;

use indicatif::ProgressBar;

pub mod clipboard;
pub mod config;
pub mod error;
pub mod flattener;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use config::{Args, Config};
pub use error::{FlattenError, Result};
pub use flattener::ProjectFlattener;
pub use report::{ClipboardStatus, FileReportInfo, ReportFormat, Reporter, RunStatistics};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{
    ContentBlock, FileCandidate, FileOutcome, OutputDocument, SkipReason, SkippedFile,
    UnreadableFile,
};
pub use writer::DumpWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flatten `config.root_path` with the system clipboard and no progress display
pub fn flatten(config: Config) -> Result<RunStatistics> {
    ProjectFlattener::new(config, Arc::new(ProgressBar::hidden())).run()
}
