//! Document model: canvas elements and the in-memory store that owns them.
//!
//! This module defines what lives on the canvas (`Element`, `ElementKind`),
//! the local bookkeeping attached to each element while it is in memory
//! (`LocalKey`, `SyncState`, `Entry`), and the ordered store itself
//! (`ElementStore`).
//!
//! Data flows into this layer from the network (initial load and create
//! acknowledgements) and from the controller (local mutations). Elements are
//! addressed by their position in the store; because positions shift when an
//! element is removed, every long-lived reference also carries the element's
//! `LocalKey` and is re-checked before use.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{HEADING_HEIGHT, HEADING_WIDTH, NOTE_HEIGHT, NOTE_WIDTH};

/// Server-assigned element identifier. `0` means "not yet persisted".
pub type ElementId = i64;

/// Server-assigned project identifier.
pub type ProjectId = i64;

/// The kind of an element. Fixed at creation.
///
/// Unrecognized wire names deserialize as [`ElementKind::Note`]; the service
/// stores any type string and such elements are shown as notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ElementKind {
    /// Free-text sticky note.
    #[default]
    Note,
    /// Note with a completion checkbox.
    Task,
    /// Wide single-line title.
    Heading,
}

impl ElementKind {
    /// Default `(width, height)` for newly created elements of this kind.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Note | Self::Task => (NOTE_WIDTH, NOTE_HEIGHT),
            Self::Heading => (HEADING_WIDTH, HEADING_HEIGHT),
        }
    }

    /// Parse a wire name, falling back to `Note` for anything unknown.
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        match name {
            "task" => Self::Task,
            "heading" => Self::Heading,
            _ => Self::Note,
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Task => "task",
            Self::Heading => "heading",
        }
    }
}

impl From<String> for ElementKind {
    fn from(name: String) -> Self {
        Self::from_wire(&name)
    }
}

/// An element as stored locally and exchanged with the element service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Server identity; `0` until the create call is acknowledged.
    #[serde(default)]
    pub id: ElementId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Note, task or heading.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Free text. Empty renders as a placeholder.
    #[serde(default)]
    pub content: String,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Only meaningful for tasks.
    #[serde(default)]
    pub completed: bool,
    /// Stacking order; higher draws above lower.
    #[serde(default)]
    pub z_index: i64,
}

impl Element {
    /// A new, unpersisted element of `kind` centered on `(cx, cy)`.
    #[must_use]
    pub fn centered(project_id: ProjectId, kind: ElementKind, cx: f64, cy: f64, z_index: i64) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: 0,
            project_id,
            kind,
            content: String::new(),
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
            completed: false,
            z_index,
        }
    }

    /// Whether the server has assigned this element an identity.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Whether a canvas-space point falls inside the element's rectangle.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Stable local handle for an element. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalKey(Uuid);

impl LocalKey {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Where an element stands with respect to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Has a server identity; updates and deletes are persisted.
    Synced,
    /// Created locally; the create call has not answered yet.
    Pending,
    /// The create call failed. The element lives only in this session.
    LocalOnly,
}

/// An element plus its local bookkeeping.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: LocalKey,
    pub sync: SyncState,
    /// Set when a durable edit lands while the create call is still in flight.
    pub dirty_while_pending: bool,
    pub element: Element,
}

/// Ordered in-memory store of elements for the active project.
#[derive(Debug, Default)]
pub struct ElementStore {
    entries: Vec<Entry>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Replace all elements with a server snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.entries = elements
            .into_iter()
            .map(|element| Entry {
                key: LocalKey::new(),
                sync: if element.is_persisted() { SyncState::Synced } else { SyncState::LocalOnly },
                dirty_while_pending: false,
                element,
            })
            .collect();
    }

    /// Append an unpersisted element. Returns its index and key.
    pub fn push_pending(&mut self, element: Element) -> (usize, LocalKey) {
        let key = LocalKey::new();
        self.entries.push(Entry { key, sync: SyncState::Pending, dirty_while_pending: false, element });
        (self.entries.len() - 1, key)
    }

    /// Remove the element at `index`, returning its entry if present.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.entries.get(index).map(|e| &e.element)
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Current index of the element with `key`.
    #[must_use]
    pub fn index_of(&self, key: LocalKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Resolve a captured `(index, key)` pair to the element's current index.
    ///
    /// The captured index is tried first and accepted only if it still holds
    /// the same key; otherwise the key is looked up. `None` means the element
    /// is gone.
    #[must_use]
    pub fn resolve(&self, index: usize, key: LocalKey) -> Option<usize> {
        match self.entries.get(index) {
            Some(entry) if entry.key == key => Some(index),
            _ => self.index_of(key),
        }
    }

    /// Next z-index: one above the current maximum, or 1 for an empty store.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.entries.iter().map(|e| e.element.z_index).max().unwrap_or(0).max(0) + 1
    }

    /// Patch the server identity into a pending element.
    ///
    /// Only `id` and the sync state change; content and geometry edited in
    /// the meantime are left alone. Returns the patched entry's index, or
    /// `None` when the element is no longer in the store.
    pub fn resolve_pending(&mut self, index: usize, key: LocalKey, id: ElementId) -> Option<usize> {
        let idx = self.resolve(index, key)?;
        let entry = &mut self.entries[idx];
        entry.element.id = id;
        entry.sync = SyncState::Synced;
        Some(idx)
    }

    /// Mark a pending element as permanently local. Returns false if it is gone.
    pub fn mark_local_only(&mut self, key: LocalKey) -> bool {
        let Some(idx) = self.index_of(key) else {
            return false;
        };
        self.entries[idx].sync = SyncState::LocalOnly;
        self.entries[idx].dirty_while_pending = false;
        true
    }

    /// Indices in draw order: ascending `z_index`, then insertion order.
    #[must_use]
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&i| self.entries[i].element.z_index);
        order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.entries.iter().map(|e| &e.element)
    }

    /// Entries with their bookkeeping, in store order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
