/*!
 * Core types and data structures for projdump
 */

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A file discovered during traversal, before any filter has run
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Absolute (or root-joined) path used for reading
    pub path: PathBuf,
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Bare file name
    pub file_name: String,
    /// Lowercase extension without the dot, `None` for dotfiles and extensionless names
    pub extension: Option<String>,
}

impl FileCandidate {
    /// Build a candidate for `path`, found under `root`
    pub fn new(path: &Path, root: &Path) -> Self {
        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        Self {
            path: path.to_path_buf(),
            rel_path,
            file_name,
            extension,
        }
    }

    /// Relative path with `/` separators, the form glob patterns are tested against
    pub fn rel_path_str(&self) -> String {
        self.rel_path.to_string_lossy().replace('\\', "/")
    }
}

/// One file's contribution to the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// File text, newlines normalized to `\n`
    pub content: String,
}

impl ContentBlock {
    /// Number of characters (Unicode scalar values) in the content
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Number of lines in the content
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// Append-only sequence of content blocks, in traversal order
#[derive(Debug, Clone, Default)]
pub struct OutputDocument {
    blocks: Vec<ContentBlock>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total characters across all block contents (banners excluded)
    pub fn total_chars(&self) -> usize {
        self.blocks.iter().map(ContentBlock::char_count).sum()
    }
}

/// Why a candidate did not make it into the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension missing or not in the include set
    ExtensionNotIncluded,
    /// File name is in the excluded names set
    ExcludedName,
    /// The given glob pattern matched the relative path or the file name
    ExcludedPattern(String),
    /// Content is empty or whitespace only
    Empty,
}

impl SkipReason {
    /// Whether this skip produces a diagnostic
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::ExcludedName | Self::ExcludedPattern(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtensionNotIncluded => write!(f, "extension not included"),
            Self::ExcludedName => write!(f, "excluded file name"),
            Self::ExcludedPattern(pattern) => write!(f, "matched pattern '{}'", pattern),
            Self::Empty => write!(f, "empty content"),
        }
    }
}

/// Result of running the filter chain on one candidate
#[derive(Debug)]
pub enum FileOutcome {
    /// Passed every filter
    Included(ContentBlock),
    /// Filtered out
    Skipped(SkipReason),
    /// Reading failed; the run continues
    Unreadable(io::Error),
}

/// A candidate that was filtered out with a diagnostic-worthy reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub rel_path: PathBuf,
    pub reason: SkipReason,
}

/// A candidate whose content could not be read
#[derive(Debug)]
pub struct UnreadableFile {
    pub rel_path: PathBuf,
    pub error: io::Error,
}
