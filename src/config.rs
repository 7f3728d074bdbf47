/*!
 * Configuration handling for projdump
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::{bail, ensure};
use crate::error::Result;
use crate::scanner::compile_pattern;
use crate::utils::{
    normalize_extension, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES, DEFAULT_EXCLUDED_PATTERNS,
    DEFAULT_INCLUDED_EXTENSIONS, DEFAULT_OUTPUT_FILE,
};

/// Command-line arguments for projdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten a project directory into a single text dump",
    long_about = "Walks a project tree, keeps source, config and doc files, concatenates them with header banners into one document, writes it to disk and copies it to the system clipboard."
)]
pub struct Args {
    /// Root directory to flatten
    #[clap(default_value = ".")]
    pub root_path: String,

    /// Output file name
    #[clap(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Comma-separated directory names to prune (replaces the defaults)
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Option<Vec<String>>,

    /// Comma-separated file names to skip (replaces the defaults)
    #[clap(long, value_delimiter = ',')]
    pub exclude_files: Option<Vec<String>>,

    /// Comma-separated glob patterns to skip, tested in order (replaces the defaults)
    #[clap(long, value_delimiter = ',')]
    pub exclude_patterns: Option<Vec<String>>,

    /// Comma-separated extensions to include (replaces the defaults)
    #[clap(long, value_delimiter = ',')]
    pub include_exts: Option<Vec<String>>,

    /// Sort directory entries by name for reproducible output
    #[clap(long)]
    pub sorted: bool,

    /// Do not copy the dump to the system clipboard
    #[clap(long)]
    pub no_clip: bool,

    /// Print the summary as plain lines instead of tables
    #[clap(long)]
    pub plain: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
///
/// Every set has a built-in default. Overriding a set replaces it wholesale:
///
/// ```
/// use projdump::Config;
///
/// let config = Config {
///     excluded_file_names: ["README.md".to_string()].into_iter().collect(),
///     ..Config::default()
/// };
/// assert!(!config.excluded_file_names.contains("secrets.json"));
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to flatten
    pub root_path: PathBuf,

    /// Directory names pruned before descending (case-sensitive)
    pub excluded_directory_names: HashSet<String>,

    /// Exact file names to skip
    pub excluded_file_names: HashSet<String>,

    /// Glob patterns to skip, tested in order
    pub excluded_glob_patterns: Vec<String>,

    /// Lowercase extensions without the leading dot
    pub included_extensions: HashSet<String>,

    /// Dump file path
    pub output_file: PathBuf,

    /// Sort entries at each directory level
    pub sort_entries: bool,

    /// Copy the dump to the system clipboard
    pub copy_to_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            excluded_directory_names: string_set(DEFAULT_EXCLUDED_DIRS.iter().copied()),
            excluded_file_names: string_set(DEFAULT_EXCLUDED_FILES.iter().copied()),
            excluded_glob_patterns: DEFAULT_EXCLUDED_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            included_extensions: extension_set(DEFAULT_INCLUDED_EXTENSIONS.iter().copied()),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            sort_entries: false,
            copy_to_clipboard: true,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let defaults = Self::default();

        Self {
            root_path: PathBuf::from(args.root_path),
            excluded_directory_names: args
                .exclude_dirs
                .map(|v| string_set(v.iter().map(String::as_str)))
                .unwrap_or(defaults.excluded_directory_names),
            excluded_file_names: args
                .exclude_files
                .map(|v| string_set(v.iter().map(String::as_str)))
                .unwrap_or(defaults.excluded_file_names),
            excluded_glob_patterns: args
                .exclude_patterns
                .map(|v| v.into_iter().filter(|p| !p.trim().is_empty()).collect())
                .unwrap_or(defaults.excluded_glob_patterns),
            included_extensions: args
                .include_exts
                .map(|v| extension_set(v.iter().map(String::as_str)))
                .unwrap_or(defaults.included_extensions),
            output_file: PathBuf::from(args.output),
            sort_entries: args.sorted,
            copy_to_clipboard: !args.no_clip,
        }
    }

    /// Replace the included extensions, normalizing each entry
    pub fn with_included_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.included_extensions = exts
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root_path.is_dir(),
            PathNotFound,
            "Root directory not found: {}",
            self.root_path.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        ensure!(
            !self.included_extensions.is_empty(),
            Config,
            "No extensions to include; nothing would be dumped"
        );

        for pattern in &self.excluded_glob_patterns {
            if let Err(e) = compile_pattern(pattern) {
                bail!(Config, "Invalid exclude pattern '{}': {}", pattern, e);
            }
        }

        Ok(())
    }
}

fn string_set<'a>(items: impl Iterator<Item = &'a str>) -> HashSet<String> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn extension_set<'a>(items: impl Iterator<Item = &'a str>) -> HashSet<String> {
    items
        .map(normalize_extension)
        .filter(|e| !e.is_empty())
        .collect()
}
