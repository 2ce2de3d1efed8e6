//! Input model: tools, modifier keys, mouse buttons, input events, and the
//! interaction state machine's state.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of an event.
//! `Mode` is the mutually exclusive pointer gesture tracked between press and
//! release. `UiState` holds the orthogonal overlays (selection, the open edit
//! session, the context menu) that may coexist with any mode.
//!
//! Every reference to an element held across events stores both the index
//! seen at capture time and the element's `LocalKey`, so a stale index can be
//! detected instead of silently addressing a different element.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ElementKind, LocalKey};
use crate::viewport::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default). Double-click still creates notes.
    #[default]
    Select,
    /// Double-click creates a note.
    Note,
    /// Double-click creates a task.
    Task,
    /// Double-click creates a heading.
    Heading,
}

impl Tool {
    /// The element kind a double-click on empty canvas creates with this tool.
    #[must_use]
    pub fn creates(self) -> ElementKind {
        match self {
            Self::Select | Self::Note => ElementKind::Note,
            Self::Task => ElementKind::Task,
            Self::Heading => ElementKind::Heading,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }

    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }
}

/// One input event forwarded by the host. Coordinates are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    /// Right-click; opens the context menu.
    ContextMenu {
        x: f64,
        y: f64,
    },
    /// A context menu item was chosen.
    ContextMenuSelect {
        kind: ElementKind,
    },
    Wheel {
        x: f64,
        y: f64,
        dy: f64,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The editor's text changed.
    EditorInput {
        text: String,
    },
    /// The editor lost focus.
    EditorBlur,
    /// A task's checkbox was clicked.
    CheckboxToggle {
        index: usize,
    },
    SetTool {
        tool: Tool,
    },
    /// Toolbar "zoom to fit": back to zoom 1.0, pan (0, 0).
    ResetView,
}

/// Primary pointer gesture. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the view. Moves replay absolutely from the anchors.
    Panning {
        /// Screen position of the pointer at press time.
        pointer_anchor: Point,
        /// Pan at press time.
        pan_anchor: Point,
    },
    /// Moving one element.
    DraggingElement {
        index: usize,
        key: LocalKey,
        /// Canvas-space offset from the element's top-left to the pointer.
        offset: Point,
    },
}

/// The open text editor. At most one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub index: usize,
    pub key: LocalKey,
    /// Text typed so far. Starts as the element's stored content.
    pub draft: String,
}

/// An open context menu, anchored where it was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub screen: Point,
    pub canvas: Point,
}

/// Selection of a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub key: LocalKey,
}

/// Overlays independent of the pointer gesture.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Tool used by double-click creation.
    pub tool: Tool,
    pub selected: Option<Selection>,
    pub editing: Option<EditSession>,
    pub context_menu: Option<ContextMenu>,
}
