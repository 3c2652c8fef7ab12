//! Host rendering interface
//!
//! The engine never draws anything itself. It tells the host which
//! ranges each style covers in each editor, and the host turns that
//! into editor decorations, terminal escapes, or whatever it draws with.

use crate::document::EditorId;
use crate::ranges::HighlightRange;
use crate::style::{CompiledStyle, StyleId};

/// Receives decoration updates
pub trait RenderHost {
    /// Bind `ranges` to `id` in `editor`, replacing whatever was bound
    /// before. An empty slice clears the style.
    fn set_decorations(
        &mut self,
        editor: EditorId,
        id: StyleId,
        style: &CompiledStyle,
        ranges: &[HighlightRange],
    );

    /// The style will not be used again
    fn dispose_style(&mut self, _id: StyleId) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One `set_decorations` call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub editor: EditorId,
        pub id: StyleId,
        pub ranges: Vec<HighlightRange>,
    }

    impl Call {
        pub fn is_clear(&self) -> bool {
            self.ranges.is_empty()
        }
    }

    /// Host that records every call
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub calls: Vec<Call>,
        pub disposed: Vec<StyleId>,
    }

    impl RecordingHost {
        /// Take the calls recorded so far
        pub fn drain(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl RenderHost for RecordingHost {
        fn set_decorations(
            &mut self,
            editor: EditorId,
            id: StyleId,
            _style: &CompiledStyle,
            ranges: &[HighlightRange],
        ) {
            self.calls.push(Call {
                editor,
                id,
                ranges: ranges.to_vec(),
            });
        }

        fn dispose_style(&mut self, id: StyleId) {
            self.disposed.push(id);
        }
    }
}
