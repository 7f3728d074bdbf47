/*!
 * The flatten pipeline: scan, copy to clipboard, write to disk, report
 */

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, error};

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::Config;
use crate::error::Result;
use crate::report::{ClipboardStatus, FileReportInfo, RunStatistics};
use crate::scanner::Scanner;
use crate::writer::DumpWriter;

/// Walks a project, builds the dump and hands it to the clipboard and the output file
pub struct ProjectFlattener {
    config: Config,
    scanner: Scanner,
    clipboard: Box<dyn Clipboard>,
}

impl ProjectFlattener {
    /// Create a flattener that uses the system clipboard
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let scanner = Scanner::new(config.clone(), progress);
        Self {
            config,
            scanner,
            clipboard: Box::new(SystemClipboard),
        }
    }

    /// Replace the clipboard backend
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Run one flatten pass.
    ///
    /// Per-file read errors and clipboard failures are recorded in the returned
    /// statistics. Only a failure to write the output file (or a missing root)
    /// is returned as an error.
    pub fn run(&self) -> Result<RunStatistics> {
        let start_time = Instant::now();

        let scan = self.scanner.scan()?;
        debug!(
            "Scan finished: {} included, {} skipped, {} unreadable, {} ignored by extension",
            scan.document.len(),
            scan.skipped.len(),
            scan.unreadable.len(),
            scan.ignored_by_extension
        );

        let text = DumpWriter::render(&scan.document);

        let clipboard = if self.config.copy_to_clipboard {
            match self.clipboard.copy_to_clipboard(&text) {
                Ok(()) => ClipboardStatus::Copied,
                Err(e) => {
                    self.scanner
                        .progress
                        .suspend(|| error!("❌ Failed to copy to clipboard: {}", e));
                    ClipboardStatus::Failed(e)
                }
            }
        } else {
            ClipboardStatus::Disabled
        };

        // Written regardless of the clipboard outcome
        DumpWriter::write(&text, &self.config.output_file)?;

        let file_details = scan
            .document
            .blocks()
            .iter()
            .map(|block| {
                (
                    block.rel_path.to_string_lossy().to_string(),
                    FileReportInfo {
                        lines: block.line_count(),
                        chars: block.char_count(),
                    },
                )
            })
            .collect();

        Ok(RunStatistics {
            output_file: self.config.output_file.clone(),
            duration: start_time.elapsed(),
            files_included: scan.document.len(),
            total_chars: scan.document.total_chars(),
            clipboard,
            file_details,
            skipped: scan.skipped,
            unreadable: scan.unreadable,
        })
    }
}
