//! Styles and directives
//!
//! This module turns directive characters into visual attributes:
//! - `DirectiveMap` maps characters to style-spec strings
//! - `StyleRegistry` compiles and caches those strings
//! - `CompiledStyle` is what the host ends up drawing

mod compiled;
mod directive;
mod registry;

pub use compiled::{Color, CompiledStyle, Theme};
pub use directive::DirectiveMap;
pub use registry::{ResolvedDirectives, StyleId, StyleRegistry};
