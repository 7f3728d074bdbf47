/*!
 * Directory traversal and the per-file filter chain
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use indicatif::ProgressBar;
use log::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::types::{
    ContentBlock, FileCandidate, FileOutcome, OutputDocument, SkipReason, SkippedFile,
    UnreadableFile,
};

/// Everything a scan produced
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Included blocks in traversal order
    pub document: OutputDocument,
    /// Candidates skipped by name, pattern or emptiness
    pub skipped: Vec<SkippedFile>,
    /// Candidates whose content could not be read
    pub unreadable: Vec<UnreadableFile>,
    /// Candidates dropped silently by the extension check
    pub ignored_by_extension: usize,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Excluded patterns as configured, indexed like `pattern_set`
    patterns: Vec<String>,
    /// Compiled excluded patterns
    pattern_set: GlobSet,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let mut patterns = Vec::with_capacity(config.excluded_glob_patterns.len());
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.excluded_glob_patterns {
            match compile_pattern(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    patterns.push(pattern.clone());
                }
                Err(e) => warn!("⚠️ Ignoring invalid pattern '{}': {}", pattern, e),
            }
        }

        let pattern_set = builder.build().unwrap_or_else(|e| {
            warn!("⚠️ Failed to compile excluded patterns: {}", e);
            patterns.clear();
            GlobSet::empty()
        });

        Self {
            config,
            patterns,
            pattern_set,
            progress,
        }
    }

    /// Scan the root directory and collect every block that passes the filters
    pub fn scan(&self) -> std::io::Result<ScanOutcome> {
        let root = self.config.root_path.as_path();
        // Surface a missing root as an error instead of an empty dump
        fs::metadata(root)?;

        let mut outcome = ScanOutcome::default();
        self.scan_directory(root, root, &mut outcome);
        Ok(outcome)
    }

    /// Process one directory level: its files first, then the surviving subdirectories
    fn scan_directory(&self, dir: &Path, root: &Path, outcome: &mut ScanOutcome) {
        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut subdirs: Vec<PathBuf> = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.progress
                        .suspend(|| warn!("⚠️ Cannot list entry in {}: {}", dir.display(), e));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if self.should_descend(&entry) {
                    subdirs.push(entry.into_path());
                }
            } else if file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir()) {
                // Symlinked directories are listed but never followed
                let candidate = FileCandidate::new(entry.path(), root);
                self.record(candidate, outcome);
            }
        }

        for subdir in subdirs {
            self.scan_directory(&subdir, root, outcome);
        }
    }

    /// Fold one candidate's outcome into the scan results, emitting diagnostics
    fn record(&self, candidate: FileCandidate, outcome: &mut ScanOutcome) {
        match self.evaluate(&candidate) {
            FileOutcome::Included(block) => outcome.document.push(block),
            FileOutcome::Skipped(SkipReason::ExtensionNotIncluded) => {
                outcome.ignored_by_extension += 1;
            }
            FileOutcome::Skipped(reason) => {
                match &reason {
                    SkipReason::ExcludedName => self.progress.suspend(|| {
                        info!("⏭ Skipped file: {}", candidate.rel_path.display())
                    }),
                    SkipReason::ExcludedPattern(pattern) => self.progress.suspend(|| {
                        info!(
                            "⏭ Skipped by pattern '{}': {}",
                            pattern,
                            candidate.rel_path.display()
                        )
                    }),
                    _ => {}
                }
                outcome.skipped.push(SkippedFile {
                    rel_path: candidate.rel_path,
                    reason,
                });
            }
            FileOutcome::Unreadable(error) => {
                self.progress.suspend(|| {
                    warn!(
                        "⚠️ Failed to read {}: {}",
                        candidate.rel_path.display(),
                        error
                    )
                });
                outcome.unreadable.push(UnreadableFile {
                    rel_path: candidate.rel_path,
                    error,
                });
            }
        }
    }

    /// Run the filter chain on one candidate, stopping at the first check that rejects it
    pub fn evaluate(&self, candidate: &FileCandidate) -> FileOutcome {
        if !self.has_included_extension(candidate) {
            return FileOutcome::Skipped(SkipReason::ExtensionNotIncluded);
        }

        if self.config.excluded_file_names.contains(&candidate.file_name) {
            return FileOutcome::Skipped(SkipReason::ExcludedName);
        }

        if let Some(pattern) = self.matching_pattern(candidate) {
            return FileOutcome::Skipped(SkipReason::ExcludedPattern(pattern.to_string()));
        }

        self.progress.inc(1);
        self.progress
            .set_message(format!("Reading {}", candidate.rel_path.display()));

        match fs::read_to_string(&candidate.path) {
            Ok(raw) => {
                let content = normalize_newlines(raw);
                if content.trim().is_empty() {
                    FileOutcome::Skipped(SkipReason::Empty)
                } else {
                    FileOutcome::Included(ContentBlock {
                        rel_path: candidate.rel_path.clone(),
                        content,
                    })
                }
            }
            Err(e) => FileOutcome::Unreadable(e),
        }
    }

    /// Whether a directory entry should be descended into
    pub fn should_descend(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        !name.starts_with('.') && !self.config.excluded_directory_names.contains(name.as_ref())
    }

    fn has_included_extension(&self, candidate: &FileCandidate) -> bool {
        candidate
            .extension
            .as_ref()
            .is_some_and(|ext| self.config.included_extensions.contains(ext))
    }

    /// First excluded pattern matching the relative path or the bare file name
    fn matching_pattern(&self, candidate: &FileCandidate) -> Option<&str> {
        let rel_path = candidate.rel_path_str();

        self.pattern_set
            .matches(rel_path.as_str())
            .into_iter()
            .chain(self.pattern_set.matches(candidate.file_name.as_str()))
            .min()
            .and_then(|index| self.patterns.get(index))
            .map(String::as_str)
    }
}

/// Compile an exclusion pattern: case-insensitive, `*` and `?` also match `/`
pub fn compile_pattern(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(false)
        .build()
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
fn normalize_newlines(raw: String) -> String {
    if !raw.contains('\r') {
        return raw;
    }
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(config: Config) -> Scanner {
        Scanner::new(config, Arc::new(ProgressBar::hidden()))
    }

    fn candidate(rel: &str) -> FileCandidate {
        FileCandidate::new(&Path::new("/does/not/exist").join(rel), Path::new("/does/not/exist"))
    }

    #[test]
    fn test_extension_check_runs_first() {
        let scanner = scanner(Config::default());

        // Name is excluded too, but the extension check rejects it first
        let outcome = scanner.evaluate(&candidate(".env"));
        assert!(matches!(
            outcome,
            FileOutcome::Skipped(SkipReason::ExtensionNotIncluded)
        ));

        let outcome = scanner.evaluate(&candidate("bin/out.dll"));
        assert!(matches!(
            outcome,
            FileOutcome::Skipped(SkipReason::ExtensionNotIncluded)
        ));
    }

    #[test]
    fn test_excluded_name_before_pattern() {
        let config = Config {
            excluded_glob_patterns: vec!["*.json".to_string()],
            ..Config::default()
        };
        let scanner = scanner(config);

        let outcome = scanner.evaluate(&candidate("config/secrets.json"));
        assert!(matches!(outcome, FileOutcome::Skipped(SkipReason::ExcludedName)));
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let config = Config {
            excluded_glob_patterns: vec![
                "*.min.*".to_string(),
                "*test*.cs".to_string(),
                "*Test*".to_string(),
            ],
            ..Config::default()
        };
        let scanner = scanner(config);

        match scanner.evaluate(&candidate("src/UserTest.cs")) {
            FileOutcome::Skipped(SkipReason::ExcludedPattern(p)) => assert_eq!(p, "*test*.cs"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_pattern_matches_relative_path() {
        let config = Config {
            excluded_glob_patterns: vec!["generated/**".to_string()],
            ..Config::default()
        };
        let scanner = scanner(config);

        match scanner.evaluate(&candidate("generated/api/client.ts")) {
            FileOutcome::Skipped(SkipReason::ExcludedPattern(p)) => assert_eq!(p, "generated/**"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_star_crosses_directory_separator() {
        let scanner = scanner(Config::default());

        match scanner.evaluate(&candidate("specs/Models.cs")) {
            FileOutcome::Skipped(SkipReason::ExcludedPattern(p)) => assert_eq!(p, "*spec*.cs"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        match scanner.evaluate(&candidate("UnitTests/Helpers.cs")) {
            FileOutcome::Skipped(SkipReason::ExcludedPattern(p)) => assert_eq!(p, "*test*.cs"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        let config = Config {
            excluded_glob_patterns: vec!["[".to_string(), "*.min.*".to_string()],
            ..Config::default()
        };
        let scanner = scanner(config);

        assert_eq!(scanner.patterns, vec!["*.min.*"]);
        match scanner.evaluate(&candidate("wwwroot/site.min.css")) {
            FileOutcome::Skipped(SkipReason::ExcludedPattern(p)) => assert_eq!(p, "*.min.*"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let scanner = scanner(Config::default());
        let outcome = scanner.evaluate(&candidate("src/app.ts"));
        assert!(matches!(outcome, FileOutcome::Unreadable(_)));
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n".to_string()), "a\nb\nc\n");
        assert_eq!(normalize_newlines("plain\n".to_string()), "plain\n");
    }
}
