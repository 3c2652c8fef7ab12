//! Strict Styledown rendering
//!
//! Unlike the decoration pipeline, which highlights whatever it can, this
//! renders a whole Styledown document into styled text and reports the
//! first problem it finds. Text and style lines are matched by display
//! width here, so a double-width character takes two identical style
//! characters:
//!
//! ```text
//! 好 foo
//! ** ###
//! ```

use std::collections::HashMap;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{DecorError, RenderErrorKind, Result};
use crate::preview::term_color;
use crate::style::{Color, CompiledStyle, StyleRegistry};

/// Configuration option that drops the final newline
const NO_EOL: &str = "no-eol";

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: CompiledStyle,
}

/// Styled text, with adjacent runs of equal style merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    segments: Vec<Segment>,
}

impl StyledText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append text, merging with the last segment when the style matches
    pub fn push(&mut self, text: &str, style: &CompiledStyle) {
        if let Some(last) = self.segments.last_mut() {
            if last.style == *style {
                last.text.push_str(text);
                return;
            }
        }
        self.segments.push(Segment {
            text: text.to_string(),
            style: style.clone(),
        });
    }

    /// Text without styling
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Default)]
struct Options {
    no_eol: bool,
}

/// Render Styledown markup. Errors carry 1-based line numbers.
pub fn render(source: &str, registry: &mut StyleRegistry) -> Result<StyledText> {
    let lines: Vec<&str> = source.split('\n').collect();

    let mut i = 0;
    while i + 1 < lines.len() && lines[i].width() == lines[i + 1].width() {
        i += 2;
    }
    let content_lines = i;
    if i < lines.len() {
        if !lines[i].is_empty() {
            return Err(DecorError::render(i + 1, RenderErrorKind::MissingSeparator));
        }
        i += 1;
    }
    let (options, stylesheet) = parse_config(&lines[i..], i + 1, registry)?;

    let mut text = StyledText::default();
    let plain = CompiledStyle::default();
    for i in (0..content_lines).step_by(2) {
        if i > 0 {
            text.push("\n", &plain);
        }
        render_pair(&mut text, lines[i], lines[i + 1], i + 2, &stylesheet)?;
    }
    if !options.no_eol {
        text.push("\n", &plain);
    }
    Ok(text)
}

fn render_pair(
    text: &mut StyledText,
    content: &str,
    style_line: &str,
    line_no: usize,
    stylesheet: &HashMap<char, CompiledStyle>,
) -> Result<()> {
    let style_chars: Vec<char> = style_line.chars().collect();
    let mut pos = 0;
    let mut buf = [0u8; 4];

    for ch in content.chars() {
        let width = ch.width().unwrap_or(0);
        // Zero-width characters share the style of the cell they sit on
        let start = pos.min(style_chars.len());
        let end = (pos + width.max(1)).min(style_chars.len());
        let cells = &style_chars[start..end];
        let Some(&style_ch) = cells.first() else {
            text.push(ch.encode_utf8(&mut buf), &CompiledStyle::default());
            continue;
        };
        if cells.iter().any(|&c| c != style_ch) {
            return Err(DecorError::render(
                line_no,
                RenderErrorKind::InconsistentStyle {
                    style: cells.iter().collect(),
                    ch,
                },
            ));
        }
        let style = stylesheet
            .get(&style_ch)
            .ok_or_else(|| DecorError::render(line_no, RenderErrorKind::UnknownStyle(style_ch)))?;
        text.push(ch.encode_utf8(&mut buf), style);
        pos += width;
    }
    Ok(())
}

fn parse_config(
    lines: &[&str],
    first_line_no: usize,
    registry: &mut StyleRegistry,
) -> Result<(Options, HashMap<char, CompiledStyle>)> {
    let mut options = Options::default();
    let mut stylesheet = HashMap::new();
    stylesheet.insert(' ', CompiledStyle::default());
    for (ch, spec) in [('*', "bold"), ('_', "underlined"), ('#', "inverse")] {
        let id = registry.compile(spec);
        stylesheet.insert(ch, registry.get(id).cloned().unwrap_or_default());
    }

    for (offset, line) in lines.iter().enumerate() {
        let line_no = first_line_no + offset;
        if line.is_empty() {
            continue;
        }
        if *line == NO_EOL {
            options.no_eol = true;
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(DecorError::render(line_no, RenderErrorKind::InvalidConfigLine));
        }
        let mut chars = fields[0].chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(DecorError::render(
                line_no,
                RenderErrorKind::NotSingleChar(fields[0].to_string()),
            ));
        };
        if ch.width() != Some(1) {
            return Err(DecorError::render(
                line_no,
                RenderErrorKind::NotSingleWidth(fields[0].to_string()),
            ));
        }

        let styling = fields[1..].join(" ");
        if !fields[1..].iter().all(|token| is_styling_token(token)) {
            return Err(DecorError::render(
                line_no,
                RenderErrorKind::InvalidStyling(styling),
            ));
        }
        let id = registry.compile(&styling);
        stylesheet.insert(ch, registry.get(id).cloned().unwrap_or_default());
    }
    Ok((options, stylesheet))
}

/// Attribute names, and `fg-`/`bg-`/bare colors the terminal can show
fn is_styling_token(token: &str) -> bool {
    if matches!(token, "bold" | "underlined" | "inverse") {
        return true;
    }
    let name = token
        .strip_prefix("fg-")
        .or_else(|| token.strip_prefix("bg-"))
        .unwrap_or(token);
    term_color(&Color::new(name)).is_some()
}
