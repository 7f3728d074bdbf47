/*!
 * Plain-text dump writer for projdump
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FlattenError, Result};
use crate::types::{ContentBlock, OutputDocument};

/// Width of the `=` rule above and below each file header
pub const SEPARATOR_WIDTH: usize = 20;

/// Glyph printed before each relative path
pub const FOLDER_GLYPH: &str = "📁";

/// Renders an `OutputDocument` into banner-delimited text and persists it
pub struct DumpWriter;

impl DumpWriter {
    /// Render every block, in order, into one string
    pub fn render(document: &OutputDocument) -> String {
        let capacity = document
            .blocks()
            .iter()
            .map(|b| b.content.len() + b.rel_path.as_os_str().len() + 2 * SEPARATOR_WIDTH + 16)
            .sum();
        let mut out = String::with_capacity(capacity);

        for block in document.blocks() {
            Self::render_block(block, &mut out);
        }

        out
    }

    /// Append a single banner-plus-content block to `out`
    pub fn render_block(block: &ContentBlock, out: &mut String) {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
        out.push_str(FOLDER_GLYPH);
        out.push(' ');
        out.push_str(&block.rel_path.to_string_lossy());
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&block.content);
        out.push_str("\n\n");
    }

    /// Write the rendered dump to `path`, truncating any previous file
    pub fn write(text: &str, path: &Path) -> Result<()> {
        let to_write_error = |source| FlattenError::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_write_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes()).map_err(to_write_error)?;
        writer.flush().map_err(to_write_error)?;

        Ok(())
    }
}
