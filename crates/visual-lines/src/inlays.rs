//! Inlays: non-text annotations that take vertical space.
//!
//! An inlay is anchored to a document offset (in `char`) and has a pixel height. Inline inlays
//! share their row with the text and can only make that row taller. Block inlays occupy their
//! own band below the visual line that contains their anchor.

/// Identifier handed out by [`InlayModel::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InlayId(pub u64);

/// How an inlay takes vertical space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlayKind {
    /// Rendered within the text row; grows the row if taller than the line height.
    Inline,
    /// Rendered as a band of its own between rows.
    Block,
}

/// A single inlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inlay {
    /// Identifier, unique within its model.
    pub id: InlayId,
    /// Anchor offset.
    pub offset: usize,
    /// Height in pixels.
    pub height: u32,
    /// Inline or block.
    pub kind: InlayKind,
}

impl Inlay {
    /// Whether this is an inline inlay.
    pub fn is_inline(&self) -> bool {
        self.kind == InlayKind::Inline
    }

    /// Whether this is a block inlay.
    pub fn is_block(&self) -> bool {
        self.kind == InlayKind::Block
    }
}

/// Inlays of one document, sorted by offset (ties keep insertion order).
#[derive(Debug, Clone, Default)]
pub struct InlayModel {
    inlays: Vec<Inlay>,
    next_id: u64,
}

impl InlayModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inlay and return its id.
    pub fn add(&mut self, offset: usize, height: u32, kind: InlayKind) -> InlayId {
        let id = InlayId(self.next_id);
        self.next_id += 1;

        let pos = self.inlays.partition_point(|i| i.offset <= offset);
        self.inlays.insert(
            pos,
            Inlay {
                id,
                offset,
                height,
                kind,
            },
        );
        tracing::trace!(offset, height, ?kind, id = id.0, "add inlay");
        id
    }

    /// Remove the inlay with `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: InlayId) -> bool {
        let Some(pos) = self.inlays.iter().position(|i| i.id == id) else {
            return false;
        };
        self.inlays.remove(pos);
        true
    }

    /// Remove every inlay.
    pub fn clear(&mut self) {
        self.inlays.clear();
    }

    /// All inlays, sorted by offset.
    pub fn inlays(&self) -> &[Inlay] {
        &self.inlays
    }

    /// Number of inlays.
    pub fn len(&self) -> usize {
        self.inlays.len()
    }

    /// Whether the model holds no inlays.
    pub fn is_empty(&self) -> bool {
        self.inlays.is_empty()
    }

    /// Inlays anchored within `start..end`.
    pub fn in_range(&self, start: usize, end: usize) -> &[Inlay] {
        let lo = self.inlays.partition_point(|i| i.offset < start);
        let hi = self.inlays.partition_point(|i| i.offset < end).max(lo);
        &self.inlays[lo..hi]
    }
}
