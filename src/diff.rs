//! Decoration diffing
//!
//! Each editor remembers which styles its previous frame used. Applying a
//! new frame rebinds every style in it and clears the ones that dropped
//! out, so nothing is left highlighted and nothing is cleared only to be
//! reapplied.

use std::collections::{BTreeSet, HashMap};

use crate::document::EditorId;
use crate::host::RenderHost;
use crate::ranges::{FrameDecorationSet, HighlightRange};
use crate::style::{StyleId, StyleRegistry};

/// What an editor showed last time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorRenderState {
    /// Styles with at least one range in the previous frame
    pub active: BTreeSet<StyleId>,
}

/// Per-editor previous-frame bookkeeping
#[derive(Debug, Default)]
pub struct DecorationDiffEngine {
    editors: HashMap<EditorId, EditorRenderState>,
}

impl DecorationDiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `frame` in `editor`, clearing styles the previous frame used
    /// but this one does not
    pub fn apply(
        &mut self,
        host: &mut dyn RenderHost,
        registry: &StyleRegistry,
        editor: EditorId,
        frame: &FrameDecorationSet,
    ) {
        let mut stale = self
            .editors
            .remove(&editor)
            .map(|state| state.active)
            .unwrap_or_default();

        for (id, ranges) in frame.iter() {
            set(host, registry, editor, id, ranges);
            stale.remove(&id);
        }
        for id in stale {
            tracing::trace!(editor = editor.0, style = id.index(), "clearing unused style");
            set(host, registry, editor, id, &[]);
        }

        self.editors.insert(
            editor,
            EditorRenderState {
                active: frame.styles().collect(),
            },
        );
    }

    /// Clear everything `editor` shows and forget it.
    ///
    /// Returns false if the editor was never rendered.
    pub fn release(
        &mut self,
        host: &mut dyn RenderHost,
        registry: &StyleRegistry,
        editor: EditorId,
    ) -> bool {
        let Some(state) = self.editors.remove(&editor) else {
            return false;
        };
        for id in state.active {
            set(host, registry, editor, id, &[]);
        }
        true
    }

    /// Previous-frame state of an editor
    pub fn state(&self, editor: EditorId) -> Option<&EditorRenderState> {
        self.editors.get(&editor)
    }

    /// Editors with render state
    pub fn editors(&self) -> Vec<EditorId> {
        let mut ids: Vec<_> = self.editors.keys().copied().collect();
        ids.sort();
        ids
    }
}

fn set(
    host: &mut dyn RenderHost,
    registry: &StyleRegistry,
    editor: EditorId,
    id: StyleId,
    ranges: &[HighlightRange],
) {
    match registry.get(id) {
        Some(style) => host.set_decorations(editor, id, style, ranges),
        None => tracing::warn!(style = id.index(), "style not in registry"),
    }
}
