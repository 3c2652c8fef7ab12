//! styledown-decor - decorations for Styledown documents and transcripts
//!
//! Styledown pairs every line of text with a line of style characters:
//!
//! ```text
//! foobar
//! ***###
//! ```
//!
//! This crate turns such documents, and the boxed terminal blocks of
//! transcripts, into highlight ranges for an editor, and keeps them in
//! sync as the document changes.

pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod preview;
pub mod ranges;
pub mod render;
pub mod scan;
pub mod style;

pub use config::Config;
pub use diff::{DecorationDiffEngine, EditorRenderState};
pub use document::{Document, DocumentId, DocumentKind, EditorId, TextDocument};
pub use error::{DecorError, RenderErrorKind, Result};
pub use host::RenderHost;
pub use orchestrator::{EditorView, Orchestrator};
pub use preview::TerminalPreview;
pub use ranges::{FrameDecorationSet, HighlightRange};
pub use scan::Region;
pub use style::{Color, CompiledStyle, DirectiveMap, StyleId, StyleRegistry, Theme};
