//! Documents and editor identities
//!
//! The engine only needs line access; `TextDocument` is the in-memory
//! implementation used by the command-line tool and the tests.

use std::ops::Range;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Read-only line access to a document snapshot
pub trait Document {
    /// Number of lines
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator; empty when out of range
    fn line(&self, idx: usize) -> &str;
}

/// Which decoration convention a document follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Content/style line pairs with an optional configuration stanza
    Plain,
    /// Box-delimited terminal blocks inside surrounding text
    Transcript,
}

impl DocumentKind {
    /// Parse a kind name as used on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "plain" | "styledown" => Some(DocumentKind::Plain),
            "transcript" => Some(DocumentKind::Transcript),
            _ => None,
        }
    }

    /// Kind name
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Plain => "plain",
            DocumentKind::Transcript => "transcript",
        }
    }
}

/// Identity of an editor (a view onto a document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u64);

/// Identity of a document, shared by all editors showing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// An in-memory document made of lines
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    /// Create a document from text.
    ///
    /// Lines are split on `\n` with a trailing `\r` removed. A trailing
    /// newline leaves a final empty line, the way editors count lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Read a document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }

    /// All lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace a range of lines with the lines of `text`
    pub fn replace_lines(&mut self, range: Range<usize>, text: &str) {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        let replacement = if text.is_empty() {
            Vec::new()
        } else {
            split_lines(text)
        };
        self.lines.splice(start..end, replacement);
    }

    /// Replace the text of a single line
    pub fn set_line(&mut self, idx: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(idx) {
            *line = text.into();
        }
    }

    /// Contents joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let doc = TextDocument::from_text("ab\r\n*_\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), "ab");
        assert_eq!(doc.line(1), "*_");
        assert_eq!(doc.line(2), "");
        assert_eq!(doc.line(99), "");
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let doc = TextDocument::from_text("");
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn test_replace_lines() {
        let mut doc = TextDocument::from_text("a\nb\nc\nd");
        doc.replace_lines(1..3, "x\ny\nz");
        assert_eq!(doc.lines(), &["a", "x", "y", "z", "d"]);

        doc.replace_lines(0..2, "");
        assert_eq!(doc.text(), "y\nz\nd");

        // Out-of-range ranges are clamped
        doc.replace_lines(10..12, "tail");
        assert_eq!(doc.text(), "y\nz\nd\ntail");
    }

    #[test]
    fn test_set_line() {
        let mut doc = TextDocument::from_text("ab\n**");
        doc.set_line(1, "__");
        assert_eq!(doc.line(1), "__");
        doc.set_line(5, "ignored");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(DocumentKind::parse("plain"), Some(DocumentKind::Plain));
        assert_eq!(DocumentKind::parse("Transcript"), Some(DocumentKind::Transcript));
        assert_eq!(DocumentKind::parse("markdown"), None);
        assert_eq!(DocumentKind::Transcript.name(), "transcript");
    }
}
