//! Directive character maps
//!
//! A directive map says which style-spec a character in a style line
//! stands for. Plain documents start from the built-in defaults and can
//! remap characters in their configuration stanza; transcripts use a
//! fixed extended set.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::document::Document;
use crate::scan;

/// Built-in directive characters
const DEFAULT_DIRECTIVES: [(char, &str); 3] = [('*', "bold"), ('_', "underlined"), ('#', "inverse")];

/// Extra directive characters available inside transcript blocks
const EXTENDED_DIRECTIVES: [(char, &str); 3] = [('R', "red"), ('G', "green"), ('M', "magenta")];

/// `<char><whitespace><spec>`
fn stanza_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(\S)\s+(.+)$").ok())
        .as_ref()
}

/// Mapping from directive character to style-spec string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMap {
    specs: HashMap<char, String>,
}

impl DirectiveMap {
    /// The built-in `*`, `_` and `#` directives
    pub fn defaults() -> Self {
        Self {
            specs: DEFAULT_DIRECTIVES
                .iter()
                .map(|&(ch, spec)| (ch, spec.to_string()))
                .collect(),
        }
    }

    /// Defaults plus the transcript color channels
    pub fn extended() -> Self {
        let mut map = Self::defaults();
        for (ch, spec) in EXTENDED_DIRECTIVES {
            map.insert(ch, spec);
        }
        map
    }

    /// Build the map for a plain document: defaults overlaid with its
    /// configuration stanza
    pub fn build(doc: &dyn Document) -> Self {
        Self::with_stanza(doc, scan::count_content_lines(doc))
    }

    /// Like `build`, when the content boundary is already known
    pub fn with_stanza(doc: &dyn Document, content_lines: usize) -> Self {
        let mut map = Self::defaults();
        map.apply_stanza((content_lines..doc.line_count()).map(|i| doc.line(i)));
        map
    }

    /// Overlay configuration lines; later lines win, other lines are skipped
    pub fn apply_stanza<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        let Some(pattern) = stanza_pattern() else {
            return;
        };
        for line in lines {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let ch = caps[1].chars().next();
            if let Some(ch) = ch {
                self.insert(ch, &caps[2]);
            }
        }
    }

    /// Map a character, replacing any previous spec
    pub fn insert(&mut self, ch: char, spec: &str) {
        self.specs.insert(ch, spec.to_string());
    }

    /// Spec for a character
    pub fn get(&self, ch: char) -> Option<&str> {
        self.specs.get(&ch).map(|s| s.as_str())
    }

    /// Iterate over `(char, spec)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.specs.iter().map(|(&ch, spec)| (ch, spec.as_str()))
    }

    /// Number of mapped characters
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if no characters are mapped
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for DirectiveMap {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    #[test]
    fn test_defaults() {
        let map = DirectiveMap::defaults();
        assert_eq!(map.get('*'), Some("bold"));
        assert_eq!(map.get('_'), Some("underlined"));
        assert_eq!(map.get('#'), Some("inverse"));
        assert_eq!(map.get('R'), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_extended() {
        let map = DirectiveMap::extended();
        assert_eq!(map.get('*'), Some("bold"));
        assert_eq!(map.get('R'), Some("red"));
        assert_eq!(map.get('G'), Some("green"));
        assert_eq!(map.get('M'), Some("magenta"));
    }

    #[test]
    fn test_stanza_overrides() {
        let doc = TextDocument::from_text("foobar\nrrrGGG\n\nr fg-red\nG inverse fg-green\n* underlined");
        let map = DirectiveMap::build(&doc);
        assert_eq!(map.get('r'), Some("fg-red"));
        assert_eq!(map.get('G'), Some("inverse fg-green"));
        assert_eq!(map.get('*'), Some("underlined"));
        assert_eq!(map.get('_'), Some("underlined"));
    }

    #[test]
    fn test_later_line_replaces_earlier() {
        let doc = TextDocument::from_text("ab\nRR\n\nR bg-red fg-white\nR bold");
        let map = DirectiveMap::build(&doc);
        assert_eq!(map.get('R'), Some("bold"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut map = DirectiveMap::defaults();
        map.apply_stanza(["no-eol", "", "xy", " leading space", "Q  fg-blue"]);
        assert_eq!(map.get('Q'), Some("fg-blue"));
        assert_eq!(map.get('n'), None);
        assert_eq!(map.get('x'), None);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_content_lines_are_not_stanza() {
        // "x bold" sits inside the content region and must not be read as config
        let doc = TextDocument::from_text("x bold\n******");
        let map = DirectiveMap::build(&doc);
        assert_eq!(map.get('x'), None);
    }
}
