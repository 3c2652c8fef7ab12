//! Region scanning
//!
//! Plain documents have a single content region at the top, made of
//! content/style line pairs. Transcripts contain any number of boxed
//! terminal blocks:
//!
//! ```text
//! ┌─────┐
//! │hello│
//! │*****│
//! └─────┘
//! ```
//!
//! Both scans run over the whole document on every call.

use crate::document::{Document, DocumentKind};

/// Opens a transcript block
pub const TOP_LEFT: char = '┌';
/// Starts every interior line of a transcript block
pub const VERTICAL: char = '│';
/// Closes a transcript block
pub const BOTTOM_LEFT: char = '└';

/// Interior lines `[start, end)` of a transcript block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of interior lines
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Number of lines in the content region of a plain document.
///
/// Content ends at the first pair whose first line is empty and second
/// line is not; that pair starts the configuration stanza. Without such a
/// pair the whole document is content, minus an unpaired last line.
pub fn count_content_lines(doc: &dyn Document) -> usize {
    let count = doc.line_count();
    let mut i = 0;
    while i + 1 < count {
        if doc.line(i).is_empty() && !doc.line(i + 1).is_empty() {
            return i;
        }
        i += 2;
    }
    count - count % 2
}

/// Folding ranges for a plain document, one per content/style pair
pub fn folding_ranges(doc: &dyn Document) -> Vec<(usize, usize)> {
    (0..count_content_lines(doc))
        .step_by(2)
        .map(|i| (i, i + 1))
        .collect()
}

/// Folding ranges for a document of the given kind. Only plain
/// documents fold; transcripts and undecorated documents have none.
pub fn folding_ranges_for(kind: Option<DocumentKind>, doc: &dyn Document) -> Vec<(usize, usize)> {
    match kind {
        Some(DocumentKind::Plain) => folding_ranges(doc),
        Some(DocumentKind::Transcript) | None => Vec::new(),
    }
}

/// Find the closed transcript blocks of a document.
///
/// A block that meets a line which neither continues nor closes it is
/// dropped; scanning picks up after that line, or at it when the line
/// opens a new block. A block still open at the end of the document is
/// dropped as well.
pub fn find_blocks(doc: &dyn Document) -> Vec<Region> {
    let count = doc.line_count();
    let mut regions = Vec::new();
    let mut i = 0;

    while i < count {
        if !doc.line(i).starts_with(TOP_LEFT) {
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut j = start;
        // Where to resume once this attempt is classified
        let mut resume = count;
        while j < count {
            let line = doc.line(j);
            if line.starts_with(BOTTOM_LEFT) {
                regions.push(Region::new(start, j));
                resume = j + 1;
                break;
            }
            if line.starts_with(VERTICAL) {
                j += 1;
                continue;
            }
            tracing::trace!(opened = i, line = j, "abandoning transcript block");
            resume = if line.starts_with(TOP_LEFT) { j } else { j + 1 };
            break;
        }
        if j >= count {
            tracing::trace!(opened = i, "unterminated transcript block");
        }
        i = resume;
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    fn doc(text: &str) -> TextDocument {
        TextDocument::from_text(text)
    }

    #[test]
    fn test_content_lines_stop_at_stanza() {
        assert_eq!(count_content_lines(&doc("ab\n*_\n\nR fg-red")), 2);
        assert_eq!(count_content_lines(&doc("\nx")), 0);
    }

    #[test]
    fn test_content_lines_without_stanza() {
        assert_eq!(count_content_lines(&doc("ab\n*_")), 2);
        assert_eq!(count_content_lines(&doc("ab\n*_\ncd")), 2);
        assert_eq!(count_content_lines(&doc("ab\n*_\ncd\n__")), 4);
        assert_eq!(count_content_lines(&doc("single")), 0);
    }

    #[test]
    fn test_content_lines_blank_pairs_stay_content() {
        // An empty content line with an empty style line is still content
        assert_eq!(count_content_lines(&doc("ab\n*_\n\n\ncd\n__")), 6);
    }

    #[test]
    fn test_content_lines_only_checks_even_offsets() {
        // The blank line at index 1 is a style line, not a separator
        assert_eq!(count_content_lines(&doc("ab\n\nx\n_")), 4);
    }

    #[test]
    fn test_folding_ranges() {
        assert_eq!(folding_ranges(&doc("ab\n*_\ncd\n__\n\nR red")), vec![(0, 1), (2, 3)]);
        assert!(folding_ranges(&doc("lonely")).is_empty());
    }

    #[test]
    fn test_folding_follows_kind() {
        let d = doc("~> echo hi\n┌──┐\n│hi│\n│**│\n└──┘\nafter");
        assert!(folding_ranges_for(Some(DocumentKind::Transcript), &d).is_empty());
        assert!(folding_ranges_for(None, &d).is_empty());

        let d = doc("ab\n*_\n\nR red");
        assert_eq!(folding_ranges_for(Some(DocumentKind::Plain), &d), vec![(0, 1)]);
    }

    #[test]
    fn test_find_single_block() {
        let d = doc("~> echo hi\n┌──┐\n│hi│\n│**│\n└──┘\nafter");
        assert_eq!(find_blocks(&d), vec![Region::new(2, 4)]);
        assert_eq!(find_blocks(&d)[0].len(), 2);
    }

    #[test]
    fn test_find_multiple_blocks() {
        let d = doc("┌┐\n│a│\n│*│\n└┘\ntext\n┌┐\n│b│\n│_│\n│c│\n│#│\n└┘");
        assert_eq!(find_blocks(&d), vec![Region::new(1, 3), Region::new(6, 10)]);
    }

    #[test]
    fn test_empty_block() {
        let d = doc("┌┐\n└┘");
        let blocks = find_blocks(&d);
        assert_eq!(blocks, vec![Region::new(1, 1)]);
        assert!(blocks[0].is_empty());
    }

    #[test]
    fn test_unterminated_block_dropped() {
        assert!(find_blocks(&doc("┌──┐\n│hi│\n│**│")).is_empty());
        assert!(find_blocks(&doc("┌──┐")).is_empty());
    }

    #[test]
    fn test_abandoned_block_resumes_after_offender() {
        let d = doc("┌┐\n│a│\noops\n│*│\n└┘\n┌┐\n│b│\n│_│\n└┘");
        // The stray "└┘" at line 4 belongs to no block
        assert_eq!(find_blocks(&d), vec![Region::new(6, 8)]);
    }

    #[test]
    fn test_abandoned_by_new_opener() {
        let d = doc("┌┐\n│a│\n┌┐\n│b│\n│_│\n└┘");
        assert_eq!(find_blocks(&d), vec![Region::new(3, 5)]);
    }

    #[test]
    fn test_lines_inside_closed_block_not_reexamined() {
        // "│┌" continues the block; it never opens a new one
        let d = doc("┌┐\n│┌│\n│*│\n└┘");
        assert_eq!(find_blocks(&d), vec![Region::new(1, 3)]);
    }
}
