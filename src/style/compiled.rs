//! Compiled style types
//!
//! A `CompiledStyle` is the canonical visual attribute set a style-spec
//! string resolves to. Colors are passed through by name, so the host
//! decides what `red` or `editor.foreground` actually looks like.

use std::fmt;

/// A color name or value, passed through to the host as written
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(String);

impl Color {
    /// Create a color from a name or value (`red`, `#ff0000`, `editor.foreground`)
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the color name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Theme colors the compiler falls back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Editor foreground, used when `inverse` meets an unset foreground
    pub foreground: Color,
    /// Editor background, used when `inverse` meets an unset background
    pub background: Color,
    /// Border color of the cursor highlight in transcripts
    pub cursor_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::new("editor.foreground"),
            background: Color::new("editor.background"),
            cursor_border: Color::new("editorCursor.foreground"),
        }
    }
}

/// Visual attributes resolved from a style-spec
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CompiledStyle {
    /// Bold text
    pub bold: bool,
    /// Underlined text
    pub underline: bool,
    /// Whether an odd number of `inverse` tokens was applied
    pub inverse: bool,
    /// Foreground color (None = editor default)
    pub foreground: Option<Color>,
    /// Background color (None = editor default)
    pub background: Option<Color>,
    /// Outline color; only the transcript cursor style sets this
    pub border: Option<Color>,
}

impl CompiledStyle {
    /// Style drawn around the transcript cursor cell
    pub fn cursor(theme: &Theme) -> Self {
        Self {
            border: Some(theme.cursor_border.clone()),
            ..Default::default()
        }
    }

    /// Swap foreground and background, filling unset sides from the theme
    pub fn invert(&mut self, theme: &Theme) {
        let fg = self
            .foreground
            .take()
            .unwrap_or_else(|| theme.foreground.clone());
        let bg = self
            .background
            .take()
            .unwrap_or_else(|| theme.background.clone());
        self.foreground = Some(bg);
        self.background = Some(fg);
        self.inverse = !self.inverse;
    }

    /// Layer `other` on top of this style (colors override, flags accumulate)
    pub fn merge(&mut self, other: &CompiledStyle) {
        self.bold |= other.bold;
        self.underline |= other.underline;
        self.inverse |= other.inverse;
        if other.foreground.is_some() {
            self.foreground = other.foreground.clone();
        }
        if other.background.is_some() {
            self.background = other.background.clone();
        }
        if other.border.is_some() {
            self.border = other.border.clone();
        }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_uses_theme_defaults() {
        let theme = Theme::default();
        let mut style = CompiledStyle::default();
        style.invert(&theme);
        assert_eq!(style.foreground, Some(theme.background.clone()));
        assert_eq!(style.background, Some(theme.foreground.clone()));
        assert!(style.inverse);
    }

    #[test]
    fn test_merge_layers_colors() {
        let mut base = CompiledStyle {
            bold: true,
            foreground: Some(Color::new("red")),
            ..Default::default()
        };
        let top = CompiledStyle {
            underline: true,
            foreground: Some(Color::new("blue")),
            ..Default::default()
        };
        base.merge(&top);
        assert!(base.bold);
        assert!(base.underline);
        assert_eq!(base.foreground, Some(Color::new("blue")));
        assert!(!base.is_default());
    }

    #[test]
    fn test_cursor_style_has_border_only() {
        let theme = Theme::default();
        let cursor = CompiledStyle::cursor(&theme);
        assert_eq!(cursor.border, Some(theme.cursor_border));
        assert!(cursor.foreground.is_none());
        assert!(cursor.background.is_none());
    }
}
