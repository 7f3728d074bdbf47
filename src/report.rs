/*!
 * Run statistics and reporting for projdump
 *
 * Renders the end-of-run summary with the tabled library, mirroring the
 * console banner users see after every dump.
 */

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::clipboard::ClipboardError;
use crate::types::{SkippedFile, UnreadableFile};
use crate::utils::{format_grouped, format_number};

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Outcome of the clipboard step
#[derive(Debug)]
pub enum ClipboardStatus {
    /// The dump reached the clipboard
    Copied,
    /// Copying was attempted and failed
    Failed(ClipboardError),
    /// Copying was turned off
    Disabled,
}

impl fmt::Display for ClipboardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copied => write!(f, "READY"),
            Self::Failed(_) => write!(f, "ERROR"),
            Self::Disabled => write!(f, "DISABLED"),
        }
    }
}

/// Statistics for one flatten run
#[derive(Debug)]
pub struct RunStatistics {
    /// Output file path
    pub output_file: PathBuf,
    /// Time taken to scan, copy and write
    pub duration: Duration,
    /// Number of files included in the dump
    pub files_included: usize,
    /// Total characters of included content (banners excluded)
    pub total_chars: usize,
    /// Clipboard outcome
    pub clipboard: ClipboardStatus,
    /// Per-file details, in dump order
    pub file_details: Vec<(String, FileReportInfo)>,
    /// Files skipped by name, pattern or emptiness
    pub skipped: Vec<SkippedFile>,
    /// Files that could not be read
    pub unreadable: Vec<UnreadableFile>,
}

impl RunStatistics {
    /// Whether the dump reached the clipboard
    pub fn clipboard_ready(&self) -> bool {
        matches!(self.clipboard, ClipboardStatus::Copied)
    }

    /// The dump is on disk (implied by having statistics at all) and the
    /// clipboard step either succeeded or was turned off
    pub fn is_success(&self) -> bool {
        !matches!(self.clipboard, ClipboardStatus::Failed(_))
    }

    /// Skips that produced a diagnostic
    pub fn reported_skips(&self) -> impl Iterator<Item = &SkippedFile> {
        self.skipped.iter().filter(|s| s.reason.is_reported())
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Plain lines, no box drawing
    Plain,
}

/// Report generator for run statistics
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string based on run statistics
    pub fn generate_report(&self, stats: &RunStatistics) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(stats),
            ReportFormat::Plain => self.generate_plain_report(stats),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, stats: &RunStatistics) {
        println!("\n{}", self.generate_report(stats));
    }

    fn size_text(stats: &RunStatistics) -> String {
        format!(
            "{} chars (~{} KB)",
            format_grouped(stats.total_chars),
            stats.total_chars / 1024
        )
    }

    fn clipboard_text(stats: &RunStatistics) -> String {
        match &stats.clipboard {
            ClipboardStatus::Failed(e) => format!("{} ({})", stats.clipboard, e),
            status => status.to_string(),
        }
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, stats: &RunStatistics) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: stats.output_file.display().to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", stats.duration),
            },
            SummaryRow {
                key: "✅ Files Included".to_string(),
                value: format_grouped(stats.files_included),
            },
            SummaryRow {
                key: "📊 Total Size".to_string(),
                value: Self::size_text(stats),
            },
        ];

        let reported = stats.reported_skips().count();
        if reported > 0 {
            rows.push(SummaryRow {
                key: "⏭ Skipped".to_string(),
                value: format_grouped(reported),
            });
        }

        if !stats.unreadable.is_empty() {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable".to_string(),
                value: format_grouped(stats.unreadable.len()),
            });
        }

        rows.push(SummaryRow {
            key: "📋 Clipboard".to_string(),
            value: Self::clipboard_text(stats),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a files table using the tabled crate
    fn create_files_table(&self, stats: &RunStatistics) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        let mut files: Vec<_> = stats.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: truncate_path(path, 60),
                lines: format_number(info.lines),
                chars: format_number(info.chars),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, stats: &RunStatistics) -> String {
        let summary_table = self.create_summary_table(stats);
        let summary_title = "✅  DUMP COMPLETE";

        if stats.file_details.is_empty() {
            return format!("{}\n{}", summary_title, summary_table);
        }

        let files_table = self.create_files_table(stats);
        let files_title = if stats.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  INCLUDED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }

    fn generate_plain_report(&self, stats: &RunStatistics) -> String {
        let rule = "=".repeat(50);
        format!(
            "{rule}\n✅ Copied: {} files\n📊 Total size: {}\n📋 Clipboard: {}\n{rule}",
            format_grouped(stats.files_included),
            Self::size_text(stats),
            Self::clipboard_text(stats),
        )
    }
}

/// Keep the trailing path segments that fit in `max_len`, prefixed with `...`
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let mut segments = Vec::new();
    let mut current_len = 3;
    for part in path.rsplit('/') {
        let part_len = part.chars().count() + 1;
        if current_len + part_len > max_len {
            break;
        }
        segments.push(part);
        current_len += part_len;
    }

    if segments.is_empty() {
        // A single oversized segment; keep its tail
        let tail: String = path
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        return format!("...{}", tail);
    }

    let mut result = String::from("...");
    for part in segments.iter().rev() {
        result.push('/');
        result.push_str(part);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkipReason;

    fn stats(clipboard: ClipboardStatus) -> RunStatistics {
        RunStatistics {
            output_file: PathBuf::from("project_dump.txt"),
            duration: Duration::from_millis(12),
            files_included: 2,
            total_chars: 2_048,
            clipboard,
            file_details: vec![
                ("src/app.ts".to_string(), FileReportInfo { lines: 1, chars: 3 }),
                (
                    "README.md".to_string(),
                    FileReportInfo {
                        lines: 40,
                        chars: 2_045,
                    },
                ),
            ],
            skipped: vec![
                SkippedFile {
                    rel_path: PathBuf::from("secrets.json"),
                    reason: SkipReason::ExcludedName,
                },
                SkippedFile {
                    rel_path: PathBuf::from("empty.md"),
                    reason: SkipReason::Empty,
                },
            ],
            unreadable: vec![],
        }
    }

    #[test]
    fn test_success_contract() {
        assert!(stats(ClipboardStatus::Copied).is_success());
        assert!(stats(ClipboardStatus::Copied).clipboard_ready());

        assert!(stats(ClipboardStatus::Disabled).is_success());
        assert!(!stats(ClipboardStatus::Disabled).clipboard_ready());

        let failed = stats(ClipboardStatus::Failed(ClipboardError::NoClipboardFound));
        assert!(!failed.is_success());
        assert!(!failed.clipboard_ready());
    }

    #[test]
    fn test_reported_skips_excludes_empty() {
        let stats = stats(ClipboardStatus::Copied);
        let reported: Vec<_> = stats.reported_skips().collect();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].rel_path, PathBuf::from("secrets.json"));
    }

    #[test]
    fn test_console_report_contents() {
        let report = Reporter::new(ReportFormat::ConsoleTable)
            .generate_report(&stats(ClipboardStatus::Copied));

        assert!(report.contains("INCLUDED FILES"));
        assert!(report.contains("README.md"));
        assert!(report.contains("2,048 chars (~2 KB)"));
        assert!(report.contains("READY"));
        assert!(report.contains("Skipped"));
        assert!(!report.contains("Unreadable"));
    }

    #[test]
    fn test_plain_report_shows_clipboard_error() {
        let report = Reporter::new(ReportFormat::Plain).generate_report(&stats(
            ClipboardStatus::Failed(ClipboardError::NoClipboardFound),
        ));

        assert!(report.contains("✅ Copied: 2 files"));
        assert!(report.contains("ERROR (No suitable clipboard mechanism found)"));
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("src/app.ts", 60), "src/app.ts");
        assert_eq!(
            truncate_path("very/long/directory/structure/file.rs", 20),
            ".../file.rs"
        );
        assert_eq!(
            truncate_path("very/long/directory/structure/file.rs", 24),
            ".../structure/file.rs"
        );
        assert_eq!(truncate_path("abcdefghij", 8), "...fghij");
    }
}
