//! Terminal preview
//!
//! A `RenderHost` that remembers the ranges bound to each style and
//! writes the decorated document to a terminal with crossterm.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::document::{Document, EditorId};
use crate::error::Result;
use crate::host::RenderHost;
use crate::ranges::HighlightRange;
use crate::render::StyledText;
use crate::style::{Color, CompiledStyle, StyleId};

/// Style and ranges currently bound to one style id
#[derive(Debug, Clone)]
struct Binding {
    style: CompiledStyle,
    ranges: Vec<HighlightRange>,
}

/// Terminal-backed render host
#[derive(Debug, Default)]
pub struct TerminalPreview {
    editors: HashMap<EditorId, BTreeMap<StyleId, Binding>>,
}

impl TerminalPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranges currently bound to a style in an editor
    pub fn ranges(&self, editor: EditorId, id: StyleId) -> &[HighlightRange] {
        self.editors
            .get(&editor)
            .and_then(|bindings| bindings.get(&id))
            .map(|b| b.ranges.as_slice())
            .unwrap_or(&[])
    }

    /// Number of styles with ranges in an editor
    pub fn bound_styles(&self, editor: EditorId) -> usize {
        self.editors.get(&editor).map(|b| b.len()).unwrap_or(0)
    }

    /// Write `doc` with the decorations of `editor` applied
    pub fn write_document<W: Write>(&self, out: &mut W, editor: EditorId, doc: &dyn Document) -> Result<()> {
        let cells = self.cell_styles(editor);
        let plain = CompiledStyle::default();

        for line_idx in 0..doc.line_count() {
            let line_cells = cells.get(&line_idx);
            let mut current = &plain;
            let mut col = 0;
            for ch in doc.line(line_idx).chars() {
                let style = line_cells.and_then(|c| c.get(&col)).unwrap_or(&plain);
                if style != current {
                    queue_style(out, style)?;
                    current = style;
                }
                queue!(out, Print(ch))?;
                col += ch.len_utf16();
            }
            if !current.is_default() {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
            queue!(out, Print('\n'))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Merged style of every decorated cell, by line then column
    fn cell_styles(&self, editor: EditorId) -> HashMap<usize, HashMap<usize, CompiledStyle>> {
        let mut cells: HashMap<usize, HashMap<usize, CompiledStyle>> = HashMap::new();
        let Some(bindings) = self.editors.get(&editor) else {
            return cells;
        };
        for binding in bindings.values() {
            for range in &binding.ranges {
                for col in range.start..range.end {
                    cells
                        .entry(range.line)
                        .or_default()
                        .entry(col)
                        .or_default()
                        .merge(&binding.style);
                }
            }
        }
        cells
    }
}

impl RenderHost for TerminalPreview {
    fn set_decorations(
        &mut self,
        editor: EditorId,
        id: StyleId,
        style: &CompiledStyle,
        ranges: &[HighlightRange],
    ) {
        let bindings = self.editors.entry(editor).or_default();
        if ranges.is_empty() {
            bindings.remove(&id);
            return;
        }
        bindings.insert(
            id,
            Binding {
                style: style.clone(),
                ranges: ranges.to_vec(),
            },
        );
    }

    fn dispose_style(&mut self, id: StyleId) {
        for bindings in self.editors.values_mut() {
            bindings.remove(&id);
        }
    }
}

/// Write styled text from the strict renderer
pub fn write_styled_text<W: Write>(out: &mut W, text: &StyledText) -> Result<()> {
    for segment in text.segments() {
        if segment.style.is_default() {
            queue!(out, Print(&segment.text))?;
        } else {
            queue_style(out, &segment.style)?;
            queue!(out, Print(&segment.text), SetAttribute(Attribute::Reset))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Reset attributes, then switch to `style`
fn queue_style<W: Write>(out: &mut W, style: &CompiledStyle) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.border.is_some() {
        queue!(out, SetAttribute(Attribute::Framed))?;
    }

    let mut fg = style.foreground.as_ref().and_then(term_color);
    let mut bg = style.background.as_ref().and_then(term_color);
    // Theme colors have no terminal equivalent. Queue the colors as they
    // were before the swap and let the terminal invert them, so the theme
    // side falls back to the terminal default.
    let unresolved = style.foreground.is_some() && fg.is_none()
        || style.background.is_some() && bg.is_none();
    let reverse = style.inverse && unresolved;
    if reverse {
        std::mem::swap(&mut fg, &mut bg);
    }
    if let Some(fg) = fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

/// Map a color name to a terminal color.
///
/// Accepts the ANSI names (`red`, `bright-red`), `#rrggbb` and `colorN`.
/// Anything else, theme colors included, has no terminal equivalent.
pub fn term_color(color: &Color) -> Option<TermColor> {
    let name = color.as_str().to_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(n) = name.strip_prefix("color") {
        return n.parse::<u8>().ok().map(TermColor::AnsiValue);
    }
    let color = match name.as_str() {
        "black" => TermColor::Black,
        "red" => TermColor::DarkRed,
        "green" => TermColor::DarkGreen,
        "yellow" => TermColor::DarkYellow,
        "blue" => TermColor::DarkBlue,
        "magenta" => TermColor::DarkMagenta,
        "cyan" => TermColor::DarkCyan,
        "white" => TermColor::Grey,
        "bright-black" => TermColor::DarkGrey,
        "bright-red" => TermColor::Red,
        "bright-green" => TermColor::Green,
        "bright-yellow" => TermColor::Yellow,
        "bright-blue" => TermColor::Blue,
        "bright-magenta" => TermColor::Magenta,
        "bright-cyan" => TermColor::Cyan,
        "bright-white" => TermColor::White,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<TermColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(TermColor::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::{DocumentId, DocumentKind, TextDocument};
    use crate::orchestrator::{EditorView, Orchestrator};

    fn rendered(text: &str, kind: DocumentKind) -> (String, Orchestrator<TerminalPreview>) {
        let doc = TextDocument::from_text(text);
        let mut orch = Orchestrator::new(Config::default(), TerminalPreview::new());
        orch.active_editor_changed(Some(EditorView {
            editor: EditorId(1),
            document: DocumentId(1),
            kind: Some(kind),
            text: &doc,
        }));
        let mut out = Vec::new();
        orch.host().write_document(&mut out, EditorId(1), &doc).unwrap();
        (String::from_utf8(out).unwrap(), orch)
    }

    #[test]
    fn test_term_color() {
        assert_eq!(term_color(&Color::new("red")), Some(TermColor::DarkRed));
        assert_eq!(term_color(&Color::new("bright-red")), Some(TermColor::Red));
        assert_eq!(term_color(&Color::new("color208")), Some(TermColor::AnsiValue(208)));
        assert_eq!(
            term_color(&Color::new("#FF8000")),
            Some(TermColor::Rgb { r: 255, g: 128, b: 0 })
        );
        assert_eq!(term_color(&Color::new("#ff80")), None);
        assert_eq!(term_color(&Color::new("editor.foreground")), None);
    }

    #[test]
    fn test_preview_writes_bold() {
        let (out, orch) = rendered("ab\n*_", DocumentKind::Plain);
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("\x1b[4m"));
        assert!(out.contains('a'));
        assert!(out.contains("*_"));
        assert_eq!(orch.host().bound_styles(EditorId(1)), 2);
    }

    #[test]
    fn test_preview_plain_text_untouched() {
        let (out, _) = rendered("ab\n  ", DocumentKind::Plain);
        assert_eq!(out, "ab\n  \n");
    }

    #[test]
    fn test_clear_removes_binding() {
        let mut preview = TerminalPreview::new();
        let style = CompiledStyle {
            bold: true,
            ..Default::default()
        };
        let mut registry = crate::style::StyleRegistry::default();
        let id = registry.compile("bold");
        preview.set_decorations(EditorId(1), id, &style, &[HighlightRange::cell(0, 0)]);
        assert_eq!(preview.ranges(EditorId(1), id), &[HighlightRange::cell(0, 0)]);

        preview.set_decorations(EditorId(1), id, &style, &[]);
        assert!(preview.ranges(EditorId(1), id).is_empty());
        assert_eq!(preview.bound_styles(EditorId(1)), 0);
    }

    fn queued(spec: &str) -> String {
        let mut registry = crate::style::StyleRegistry::default();
        let id = registry.compile(spec);
        let mut out = Vec::new();
        queue_style(&mut out, registry.get(id).unwrap()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_inverse_keeps_explicit_color() {
        // fg-red then inverse: red moves to the background, the theme
        // foreground stays with the terminal
        let out = queued("fg-red inverse");
        assert_eq!(
            out,
            format!(
                "{}{}{}",
                SetAttribute(Attribute::Reset),
                SetForegroundColor(TermColor::DarkRed),
                SetAttribute(Attribute::Reverse)
            )
        );
    }

    #[test]
    fn test_inverse_with_resolved_colors() {
        let out = queued("fg-red bg-blue inverse");
        assert_eq!(
            out,
            format!(
                "{}{}{}",
                SetAttribute(Attribute::Reset),
                SetForegroundColor(TermColor::DarkBlue),
                SetBackgroundColor(TermColor::DarkRed)
            )
        );
    }

    #[test]
    fn test_write_styled_text() {
        let mut registry = crate::style::StyleRegistry::default();
        let text = crate::render::render("ab\n* \n\nno-eol", &mut registry).unwrap();
        let mut out = Vec::new();
        write_styled_text(&mut out, &text).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\x1b[0m\x1b[1ma\x1b[0m"));
        assert!(out.ends_with('b'));
    }
}
