use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// An in-memory source file with a precomputed line-start table.
///
/// Positions are computed once from the raw bytes and never recomputed by
/// rule code. Lines are `\n`-terminated; a `\r\n` terminator leaves the `\r`
/// at the end of the line bytes, which is harmless to column math because
/// columns are only taken at token starts.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
    /// Byte offsets where each line starts (0-indexed into content)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_vec(path.to_path_buf(), content))
    }

    /// Create a SourceFile from a string, using the given path for display purposes.
    pub fn from_string(path: PathBuf, content: String) -> Self {
        Self::from_vec(path, content.into_bytes())
    }

    /// Create a SourceFile from raw bytes and a path.
    pub fn from_vec(path: PathBuf, content: Vec<u8>) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Returns an iterator over lines as byte slices (without `\n` terminators).
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.content.split(|&b| b == b'\n')
    }

    /// Convert a byte offset into a (line, column) pair, both 1-indexed.
    /// Column is a character offset (UTF-8 codepoint count) within the line.
    pub fn offset_to_line_col(&self, byte_offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_bytes = &self.content[self.line_starts[line_idx]..byte_offset];
        // Count bytes that are NOT UTF-8 continuation bytes (0x80..0xBF).
        // This equals the number of UTF-8 character starts, and works
        // correctly even for partial or invalid UTF-8.
        let chars_before = line_bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
        (line_idx + 1, chars_before + 1)
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

fn compute_line_starts(content: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, &byte) in content.iter().enumerate() {
        if byte == b'\n' && i + 1 < content.len() {
            starts.push(i + 1);
        }
    }
    starts
}
