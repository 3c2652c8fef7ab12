//! Error types for styledown-decor
//!
//! The decoration pipeline itself never fails; these errors come from
//! the layers around it (file I/O, config files, the strict renderer).

use thiserror::Error;

/// Result type alias for styledown-decor operations
pub type Result<T> = std::result::Result<T, DecorError>;

/// Crate error types
#[derive(Error, Debug)]
pub enum DecorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// Strict rendering failure, `line` is 1-based
    #[error("line {line}: {kind}")]
    Render { line: usize, kind: RenderErrorKind },

    #[error("{0}")]
    Message(String),
}

impl DecorError {
    pub(crate) fn render(line: usize, kind: RenderErrorKind) -> Self {
        DecorError::Render { line, kind }
    }
}

/// What went wrong while rendering Styledown markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderErrorKind {
    #[error("content and configuration stanzas must be separated by a newline")]
    MissingSeparator,

    #[error("inconsistent style {style:?} for multi-width character {ch:?}")]
    InconsistentStyle { style: String, ch: char },

    #[error("unknown style {0:?}")]
    UnknownStyle(char),

    #[error("invalid configuration line")]
    InvalidConfigLine,

    #[error("style character {0:?} not a single character")]
    NotSingleChar(String),

    #[error("style character {0:?} not single-width")]
    NotSingleWidth(String),

    #[error("invalid styling string {0:?}")]
    InvalidStyling(String),
}
