//! Event handling
//!
//! The orchestrator is driven by the host's editor events. Every relevant
//! event re-renders the whole active document: scan, build the frame,
//! diff it against what the editor showed before.

use crate::config::Config;
use crate::diff::DecorationDiffEngine;
use crate::document::{Document, DocumentId, DocumentKind, EditorId};
use crate::host::RenderHost;
use crate::ranges::{self, FrameDecorationSet};
use crate::style::StyleRegistry;

/// An editor as seen in a focus event
pub struct EditorView<'a> {
    pub editor: EditorId,
    pub document: DocumentId,
    /// None for documents that are not decorated
    pub kind: Option<DocumentKind>,
    pub text: &'a dyn Document,
}

/// The focused editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveEditor {
    editor: EditorId,
    document: DocumentId,
    kind: Option<DocumentKind>,
}

/// Reacts to editor events and keeps decorations in sync
pub struct Orchestrator<H: RenderHost> {
    config: Config,
    registry: StyleRegistry,
    diff: DecorationDiffEngine,
    host: H,
    active: Option<ActiveEditor>,
}

impl<H: RenderHost> Orchestrator<H> {
    /// Create an orchestrator with its own style registry
    pub fn new(config: Config, host: H) -> Self {
        let registry = StyleRegistry::new(config.theme.clone());
        Self::with_registry(config, registry, host)
    }

    /// Create an orchestrator around an existing registry
    pub fn with_registry(config: Config, registry: StyleRegistry, host: H) -> Self {
        Self {
            config,
            registry,
            diff: DecorationDiffEngine::new(),
            host,
            active: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn diff(&self) -> &DecorationDiffEngine {
        &self.diff
    }

    /// Kind for a language id, per the configuration
    pub fn classify(&self, language_id: &str) -> Option<DocumentKind> {
        self.config.kind_for_language(language_id)
    }

    /// Currently focused editor
    pub fn active_editor(&self) -> Option<EditorId> {
        self.active.map(|a| a.editor)
    }

    /// Focus moved to another editor (or to none)
    pub fn active_editor_changed(&mut self, view: Option<EditorView<'_>>) {
        let Some(view) = view else {
            self.active = None;
            return;
        };
        self.active = Some(ActiveEditor {
            editor: view.editor,
            document: view.document,
            kind: view.kind,
        });
        if let Some(kind) = view.kind {
            self.render(view.editor, kind, view.text);
        }
    }

    /// A document was edited; re-render it if the active editor shows it
    pub fn document_changed(&mut self, document: DocumentId, text: &dyn Document) {
        let Some(active) = self.active else {
            return;
        };
        if active.document != document {
            return;
        }
        if let Some(kind) = active.kind {
            self.render(active.editor, kind, text);
        }
    }

    /// An editor was closed; clear what it showed and drop its state
    pub fn editor_closed(&mut self, editor: EditorId) {
        if self.diff.release(&mut self.host, &self.registry, editor) {
            tracing::debug!(editor = editor.0, "released editor");
        }
        if self.active_editor() == Some(editor) {
            self.active = None;
        }
    }

    /// Release every editor and dispose every style
    pub fn shutdown(&mut self) {
        for editor in self.diff.editors() {
            self.diff.release(&mut self.host, &self.registry, editor);
        }
        for id in self.registry.ids() {
            self.host.dispose_style(id);
        }
        self.active = None;
    }

    /// Consume the orchestrator, returning the host
    pub fn into_host(self) -> H {
        self.host
    }

    /// Run the whole pipeline for one editor
    fn render(&mut self, editor: EditorId, kind: DocumentKind, text: &dyn Document) {
        let frame = self.build_frame(kind, text);
        tracing::debug!(
            editor = editor.0,
            kind = kind.name(),
            styles = frame.len(),
            ranges = frame.range_count(),
            "rendering"
        );
        self.diff.apply(&mut self.host, &self.registry, editor, &frame);
    }

    fn build_frame(&mut self, kind: DocumentKind, text: &dyn Document) -> FrameDecorationSet {
        match kind {
            DocumentKind::Plain => ranges::plain_frame(text, &mut self.registry),
            DocumentKind::Transcript => ranges::transcript_frame(text, &self.registry),
        }
    }
}
