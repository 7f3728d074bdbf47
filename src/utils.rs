/*!
 * Default filter sets and formatting helpers for projdump
 */

/// Directory names pruned before descending (in addition to hidden directories)
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "bin",
    "obj",
    ".git",
    ".vs",
    "node_modules",
    ".idea",
    "__pycache__",
    "dist",
    "build",
];

/// Exact file names that are never dumped
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "appsettings.json",
    "appsettings.Development.json",
    "secrets.json",
    ".env",
    "package-lock.json",
    "yarn.lock",
    "project_dump.txt",
];

/// Glob patterns tested, in order, against the relative path and the file name
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[
    // Test files
    "*test*.cs",
    "*spec*.cs",
    // Minified files
    "*.min.*",
    // OS files
    "Thumbs.db",
    ".DS_Store",
];

/// Extensions whose files are considered for the dump
pub const DEFAULT_INCLUDED_EXTENSIONS: &[&str] = &[
    ".cs", ".csproj", ".sln", ".config", ".json", ".xml", ".cshtml", ".razor", ".html", ".css",
    ".scss", ".ts", ".js", ".tsx", ".jsx", ".sql", ".md", ".txt", ".yml", ".yaml",
];

/// Default name of the dump file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "project_dump.txt";

/// Normalize an extension to the form stored in the include set: lowercase, no leading dot
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Format a count with thousands separators, e.g. `12,345`
pub fn format_grouped(num: usize) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".CS"), "cs");
        assert_eq!(normalize_extension("ts"), "ts");
        assert_eq!(normalize_extension(" .Yaml "), "yaml");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_300_000), "2.3M");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_defaults_contain_own_output() {
        assert!(DEFAULT_EXCLUDED_FILES.contains(&DEFAULT_OUTPUT_FILE));
    }
}
