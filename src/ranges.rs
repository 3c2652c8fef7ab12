//! Highlight range building
//!
//! Walks the style lines of a scanned document and collects, per compiled
//! style, the single-column ranges to highlight in the content lines
//! above them. Columns count UTF-16 code units, the unit editors use for
//! positions.

use std::collections::BTreeMap;

use crate::document::Document;
use crate::scan;
use crate::style::{DirectiveMap, ResolvedDirectives, StyleId, StyleRegistry};

/// Combining overline + combining circumflex, marking the cursor cell
pub const CURSOR_MARKER: &str = "\u{0305}\u{0302}";

/// A highlighted column `[start, end)` of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HighlightRange {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    /// Range covering one column
    pub fn cell(line: usize, col: usize) -> Self {
        Self {
            line,
            start: col,
            end: col + 1,
        }
    }

    /// Check if this range covers a column of a line
    pub fn contains(&self, line: usize, col: usize) -> bool {
        self.line == line && col >= self.start && col < self.end
    }
}

/// Everything one render pass highlights, grouped by style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDecorationSet {
    ranges: BTreeMap<StyleId, Vec<HighlightRange>>,
}

impl FrameDecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a range to a style's list
    pub fn push(&mut self, style: StyleId, range: HighlightRange) {
        self.ranges.entry(style).or_default().push(range);
    }

    /// Ranges bound to a style, if it is used in this frame
    pub fn get(&self, style: StyleId) -> Option<&[HighlightRange]> {
        self.ranges.get(&style).map(|r| r.as_slice())
    }

    /// Styles used in this frame
    pub fn styles(&self) -> impl Iterator<Item = StyleId> + '_ {
        self.ranges.keys().copied()
    }

    /// Iterate over `(style, ranges)` pairs in style order
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &[HighlightRange])> {
        self.ranges.iter().map(|(&id, ranges)| (id, ranges.as_slice()))
    }

    /// Number of styles used
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of ranges across all styles
    pub fn range_count(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }
}

/// Build the frame for a plain document
pub fn plain_frame(doc: &dyn Document, registry: &mut StyleRegistry) -> FrameDecorationSet {
    let content_lines = scan::count_content_lines(doc);
    let directives = registry.resolve(&DirectiveMap::with_stanza(doc, content_lines));

    let mut frame = FrameDecorationSet::new();
    for i in (0..content_lines).step_by(2) {
        style_line_ranges(&mut frame, &directives, i, doc.line(i + 1), |_| true);
    }
    frame
}

/// Build the frame for a transcript document
pub fn transcript_frame(doc: &dyn Document, registry: &StyleRegistry) -> FrameDecorationSet {
    let directives = registry.extended();
    let mut frame = FrameDecorationSet::new();

    for region in scan::find_blocks(doc) {
        let mut i = region.start;
        while i + 1 < region.end {
            let mut style_line = doc.line(i + 1).to_string();

            if let Some(byte_pos) = style_line.find(CURSOR_MARKER) {
                let col = utf16_len(&style_line[..byte_pos]);
                if col > 0 {
                    frame.push(registry.cursor(), HighlightRange::cell(i, col - 1));
                }
                style_line.replace_range(byte_pos..byte_pos + CURSOR_MARKER.len(), "");
            }

            // The first and last columns hold the block's side borders
            let width = utf16_len(&style_line);
            style_line_ranges(&mut frame, directives, i, &style_line, |col| {
                col >= 1 && col + 1 < width
            });
            i += 2;
        }
    }
    frame
}

/// Add a range for every directive character of `style_line` in a
/// column accepted by `in_bounds`
fn style_line_ranges(
    frame: &mut FrameDecorationSet,
    directives: &ResolvedDirectives,
    line: usize,
    style_line: &str,
    in_bounds: impl Fn(usize) -> bool,
) {
    let mut col = 0;
    for ch in style_line.chars() {
        if in_bounds(col) {
            if let Some(&style) = directives.get(&ch) {
                frame.push(style, HighlightRange::cell(line, col));
            }
        }
        col += ch.len_utf16();
    }
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}
