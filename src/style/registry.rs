//! Style registry
//!
//! Compiles style-spec strings into `CompiledStyle`s and hands out stable
//! `StyleId`s. Entries are never evicted, so an id stays valid for the
//! lifetime of the registry and equal spec strings always share one id.

use std::collections::HashMap;

use super::compiled::{Color, CompiledStyle, Theme};
use super::directive::DirectiveMap;

/// Handle to a compiled style inside a `StyleRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u32);

impl StyleId {
    /// Position of the style in its registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Directive characters already resolved to style ids
pub type ResolvedDirectives = HashMap<char, StyleId>;

/// Memoizing style compiler
pub struct StyleRegistry {
    theme: Theme,
    /// Compiled styles, indexed by `StyleId`
    styles: Vec<CompiledStyle>,
    /// Exact spec string -> id
    by_spec: HashMap<String, StyleId>,
    /// Transcript directive table, compiled once
    extended: ResolvedDirectives,
    /// Transcript cursor style
    cursor: StyleId,
}

impl StyleRegistry {
    /// Create a registry and precompile the transcript styles
    pub fn new(theme: Theme) -> Self {
        let cursor_style = CompiledStyle::cursor(&theme);
        let mut registry = Self {
            theme,
            styles: vec![cursor_style],
            by_spec: HashMap::new(),
            extended: HashMap::new(),
            cursor: StyleId(0),
        };
        registry.extended = registry.resolve(&DirectiveMap::extended());
        registry
    }

    /// Theme used for `inverse` defaults and the cursor
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Compile a style-spec, returning the cached id when seen before
    pub fn compile(&mut self, spec: &str) -> StyleId {
        if let Some(&id) = self.by_spec.get(spec) {
            return id;
        }
        let style = compile_spec(spec, &self.theme);
        let id = StyleId(self.styles.len() as u32);
        self.styles.push(style);
        self.by_spec.insert(spec.to_string(), id);
        tracing::trace!(spec, index = id.index(), "compiled style");
        id
    }

    /// Compile every spec of a directive map
    pub fn resolve(&mut self, directives: &DirectiveMap) -> ResolvedDirectives {
        directives
            .iter()
            .map(|(ch, spec)| (ch, self.compile(spec)))
            .collect()
    }

    /// Look up a compiled style
    pub fn get(&self, id: StyleId) -> Option<&CompiledStyle> {
        self.styles.get(id.index())
    }

    /// Id of the style-spec if it has been compiled
    pub fn lookup(&self, spec: &str) -> Option<StyleId> {
        self.by_spec.get(spec).copied()
    }

    /// Transcript directive table
    pub fn extended(&self) -> &ResolvedDirectives {
        &self.extended
    }

    /// Transcript cursor style
    pub fn cursor(&self) -> StyleId {
        self.cursor
    }

    /// All registered style ids, in creation order
    pub fn ids(&self) -> impl Iterator<Item = StyleId> + '_ {
        (0..self.styles.len()).map(|i| StyleId(i as u32))
    }

    /// Number of compiled styles (including the cursor style)
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always false, the cursor style is registered on creation
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Fold the tokens of a style-spec into an attribute set.
///
/// The grammar is total: anything unrecognized is a foreground color.
fn compile_spec(spec: &str, theme: &Theme) -> CompiledStyle {
    let mut style = CompiledStyle::default();
    for token in spec.split_whitespace() {
        match token {
            "bold" => style.bold = true,
            "underlined" => style.underline = true,
            "inverse" => style.invert(theme),
            _ => {
                if let Some(color) = token.strip_prefix("bg-") {
                    style.background = Some(Color::new(color));
                } else if let Some(color) = token.strip_prefix("fg-") {
                    style.foreground = Some(Color::new(color));
                } else {
                    style.foreground = Some(Color::new(token));
                }
            }
        }
    }
    style
}
