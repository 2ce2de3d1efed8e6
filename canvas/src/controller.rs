//! Interaction controller: the single state machine behind the canvas view.
//!
//! `Controller` owns the viewport, the element store and the interaction
//! state. Every input event goes through one of its `on_*` methods (or the
//! `handle` dispatcher), mutates state synchronously, and returns the side
//! effects the host must carry out as a list of [`Action`]s. Nothing here
//! touches the network; durable actions are handed to the sync layer, and
//! its answers come back through [`Controller::apply_created`] and
//! [`Controller::apply_create_failed`].
//!
//! Guard policy: any index that no longer resolves to the element it was
//! captured for turns the operation into a no-op. Nothing in this module
//! fails.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::doc::{Element, ElementId, ElementKind, ElementStore, LocalKey, ProjectId, SyncState};
use crate::hit::hit_test;
use crate::input::{Button, ContextMenu, EditSession, InputEvent, Key, Mode, Modifiers, Selection, Tool, UiState};
use crate::viewport::{Point, Viewport, ZoomDirection};

/// Side effects returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new element was appended at `index`; create it remotely and report
    /// the assigned id back with the same `index` and `key`.
    ElementCreated { index: usize, key: LocalKey, element: Element },
    /// Position-only update after a drag.
    ElementMoved { id: ElementId, x: f64, y: f64 },
    /// Full mutable field set after an edit commit or checkbox toggle.
    ElementUpdated { id: ElementId, element: Element },
    ElementDeleted { id: ElementId },
    /// The host should show and focus the editor for the element at `index`.
    EditStarted { index: usize },
    SetCursor(String),
    RenderNeeded,
}

impl Action {
    /// Whether the action must be mirrored to the element service.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(
            self,
            Self::ElementCreated { .. } | Self::ElementMoved { .. } | Self::ElementUpdated { .. } | Self::ElementDeleted { .. }
        )
    }
}

#[derive(Clone, Copy)]
enum Durable {
    Position,
    Full,
}

/// All state behind one canvas view.
#[derive(Debug, Default)]
pub struct Controller {
    pub project_id: ProjectId,
    pub store: ElementStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub mode: Mode,
}

impl Controller {
    #[must_use]
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id, ..Self::default() }
    }

    // --- Data inputs ---

    /// Hydrate from the initial element listing. Interaction state is reset;
    /// the active tool and viewport are kept.
    pub fn load_snapshot(&mut self, project_id: ProjectId, elements: Vec<Element>) {
        self.project_id = project_id;
        self.store.load_snapshot(elements);
        self.ui = UiState { tool: self.ui.tool, ..UiState::default() };
        self.mode = Mode::Idle;
    }

    /// The create call for the element captured as `(index, key)` answered with `id`.
    ///
    /// Patches the identity only. If durable edits were made while the call
    /// was in flight, they are pushed now as one full update. A no-op when
    /// the element has been deleted in the meantime.
    pub fn apply_created(&mut self, index: usize, key: LocalKey, id: ElementId) -> Vec<Action> {
        let Some(idx) = self.store.resolve_pending(index, key, id) else {
            return Vec::new();
        };
        let Some(entry) = self.store.entry_mut(idx) else {
            return Vec::new();
        };
        if !entry.dirty_while_pending {
            return Vec::new();
        }
        entry.dirty_while_pending = false;
        vec![Action::ElementUpdated { id, element: entry.element.clone() }]
    }

    /// The create call for `key` failed. The element stays, marked local-only.
    pub fn apply_create_failed(&mut self, key: LocalKey) -> Vec<Action> {
        if self.store.mark_local_only(key) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Event dispatch ---

    /// Route one host event to its handler.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, button, modifiers } => self.on_pointer_down(Point::new(x, y), button, modifiers),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::DoubleClick { x, y } => self.on_double_click(Point::new(x, y)),
            InputEvent::ContextMenu { x, y } => self.on_context_menu(Point::new(x, y)),
            InputEvent::ContextMenuSelect { kind } => self.on_context_menu_select(kind),
            InputEvent::Wheel { x, y, dy } => self.on_wheel(Point::new(x, y), dy),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(&key, modifiers),
            InputEvent::EditorInput { text } => self.on_editor_input(text),
            InputEvent::EditorBlur => self.commit_edit(),
            InputEvent::CheckboxToggle { index } => self.toggle_completed(index),
            InputEvent::SetTool { tool } => {
                self.set_tool(tool);
                vec![Action::RenderNeeded]
            }
            InputEvent::ResetView => self.reset_view(),
        }
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.context_menu.take().is_some() {
            actions.push(Action::RenderNeeded);
        }
        // A press without a release in between (lost pointer-up) ends the old gesture first.
        actions.extend(self.end_gesture());

        if button == Button::Middle || (button == Button::Primary && modifiers.alt) {
            self.mode = Mode::Panning {
                pointer_anchor: screen,
                pan_anchor: Point::new(self.viewport.pan_x, self.viewport.pan_y),
            };
            actions.push(Action::SetCursor("grabbing".into()));
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        let canvas = self.viewport.screen_to_canvas(screen);
        let Some(index) = hit_test(canvas, &self.store) else {
            actions.extend(self.commit_edit());
            self.ui.selected = None;
            actions.push(Action::RenderNeeded);
            return actions;
        };

        // Presses inside the open editor belong to the editor.
        if self.editing_index() == Some(index) {
            return actions;
        }
        actions.extend(self.commit_edit());

        let Some(entry) = self.store.entry(index) else {
            return actions;
        };
        let key = entry.key;
        let offset = Point::new(canvas.x - entry.element.x, canvas.y - entry.element.y);
        self.mode = Mode::DraggingElement { index, key, offset };
        self.ui.selected = Some(Selection { index, key });
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.mode {
            Mode::Idle => Vec::new(),
            Mode::Panning { pointer_anchor, pan_anchor } => {
                self.viewport.pan_x = pan_anchor.x + (screen.x - pointer_anchor.x);
                self.viewport.pan_y = pan_anchor.y + (screen.y - pointer_anchor.y);
                vec![Action::RenderNeeded]
            }
            Mode::DraggingElement { index, key, offset } => {
                let Some(idx) = self.store.resolve(index, key) else {
                    self.mode = Mode::Idle;
                    return Vec::new();
                };
                let canvas = self.viewport.screen_to_canvas(screen);
                if let Some(entry) = self.store.entry_mut(idx) {
                    entry.element.x = canvas.x - offset.x;
                    entry.element.y = canvas.y - offset.y;
                }
                self.mode = Mode::DraggingElement { index: idx, key, offset };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.mode) {
            Mode::Idle => Vec::new(),
            Mode::Panning { .. } => vec![Action::SetCursor("default".into())],
            Mode::DraggingElement { index, key, .. } => {
                let mut actions = Vec::new();
                if let Some(idx) = self.store.resolve(index, key) {
                    actions.extend(self.persist(idx, Durable::Position));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        let canvas = self.viewport.screen_to_canvas(screen);
        match hit_test(canvas, &self.store) {
            Some(index) => self.begin_edit(index),
            None => self.create_element(self.ui.tool.creates(), canvas),
        }
    }

    pub fn on_wheel(&mut self, screen: Point, dy: f64) -> Vec<Action> {
        self.viewport.zoom_at(screen, ZoomDirection::from_wheel(dy));
        vec![Action::RenderNeeded]
    }

    // --- Context menu ---

    pub fn on_context_menu(&mut self, screen: Point) -> Vec<Action> {
        let canvas = self.viewport.screen_to_canvas(screen);
        self.ui.context_menu = Some(ContextMenu { screen, canvas });
        vec![Action::RenderNeeded]
    }

    /// Create `kind` at the menu's canvas anchor. A no-op if no menu is open.
    pub fn on_context_menu_select(&mut self, kind: ElementKind) -> Vec<Action> {
        let Some(menu) = self.ui.context_menu.take() else {
            return Vec::new();
        };
        self.create_element(kind, menu.canvas)
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.ui.editing.is_some() {
            if key.is_escape() {
                return self.cancel_edit();
            }
            if key.is_enter() && modifiers.command() {
                return self.commit_edit();
            }
            return Vec::new();
        }

        if key.is_delete() {
            return self.delete_selected();
        }
        if key.is_escape() {
            self.ui.selected = None;
            self.ui.context_menu = None;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Editing ---

    fn begin_edit(&mut self, index: usize) -> Vec<Action> {
        if self.editing_index() == Some(index) {
            return Vec::new();
        }
        let mut actions = self.commit_edit();
        let Some(entry) = self.store.entry(index) else {
            return actions;
        };
        let key = entry.key;
        self.ui.editing = Some(EditSession { index, key, draft: entry.element.content.clone() });
        self.ui.selected = Some(Selection { index, key });
        actions.push(Action::EditStarted { index });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record the editor's current text. Nothing is persisted while typing.
    pub fn on_editor_input(&mut self, text: String) -> Vec<Action> {
        if let Some(session) = self.ui.editing.as_mut() {
            session.draft = text;
        }
        Vec::new()
    }

    /// Write the draft into the element and close the editor.
    ///
    /// Persists the full field set once when the element has a server id.
    /// If the session no longer resolves to an element, the edit is
    /// abandoned without writing anything.
    pub fn commit_edit(&mut self) -> Vec<Action> {
        let Some(session) = self.ui.editing.take() else {
            return Vec::new();
        };
        let Some(idx) = self.store.resolve(session.index, session.key) else {
            return vec![Action::RenderNeeded];
        };
        if let Some(entry) = self.store.entry_mut(idx) {
            entry.element.content = session.draft;
        }
        let mut actions: Vec<Action> = self.persist(idx, Durable::Full).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Close the editor and discard the draft.
    pub fn cancel_edit(&mut self) -> Vec<Action> {
        if self.ui.editing.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Element operations ---

    /// Append a new element of `kind` centered on `canvas` and open its editor.
    pub fn create_element(&mut self, kind: ElementKind, canvas: Point) -> Vec<Action> {
        let mut actions = self.commit_edit();
        let element = Element::centered(self.project_id, kind, canvas.x, canvas.y, self.store.next_z_index());
        let (index, key) = self.store.push_pending(element.clone());
        self.ui.editing = Some(EditSession { index, key, draft: String::new() });
        self.ui.selected = Some(Selection { index, key });
        actions.push(Action::ElementCreated { index, key, element });
        actions.push(Action::EditStarted { index });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Flip `completed` on the task at `index` and persist it. Other kinds are ignored.
    pub fn toggle_completed(&mut self, index: usize) -> Vec<Action> {
        let Some(entry) = self.store.entry_mut(index) else {
            return Vec::new();
        };
        if entry.element.kind != ElementKind::Task {
            return Vec::new();
        }
        entry.element.completed = !entry.element.completed;
        let mut actions: Vec<Action> = self.persist(index, Durable::Full).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the selected element locally and, if it has a server id, remotely.
    ///
    /// Local removal is unconditional and never rolled back.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(selection) = self.ui.selected.take() else {
            return Vec::new();
        };
        let Some(removed) = self
            .store
            .resolve(selection.index, selection.key)
            .and_then(|idx| self.store.remove(idx))
        else {
            return vec![Action::RenderNeeded];
        };
        self.reindex();

        let mut actions = Vec::new();
        if removed.element.is_persisted() {
            actions.push(Action::ElementDeleted { id: removed.element.id });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Tool / view ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport.reset();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.ui.selected.and_then(|s| self.store.resolve(s.index, s.key))
    }

    #[must_use]
    pub fn editing_index(&self) -> Option<usize> {
        self.ui.editing.as_ref().and_then(|s| self.store.resolve(s.index, s.key))
    }

    #[must_use]
    pub fn dragging_index(&self) -> Option<usize> {
        match self.mode {
            Mode::DraggingElement { index, key, .. } => self.store.resolve(index, key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.mode, Mode::Panning { .. })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.store.get(index)
    }

    #[must_use]
    pub fn sync_state(&self, index: usize) -> Option<SyncState> {
        self.store.entry(index).map(|e| e.sync)
    }

    // --- Internals ---

    fn persist(&mut self, index: usize, what: Durable) -> Option<Action> {
        let entry = self.store.entry_mut(index)?;
        let el = &entry.element;
        if el.is_persisted() {
            return Some(match what {
                Durable::Position => Action::ElementMoved { id: el.id, x: el.x, y: el.y },
                Durable::Full => Action::ElementUpdated { id: el.id, element: el.clone() },
            });
        }
        if entry.sync == SyncState::Pending {
            entry.dirty_while_pending = true;
        }
        None
    }

    /// Refresh captured indices after a removal, dropping references to
    /// elements that are gone.
    fn reindex(&mut self) {
        let store = &self.store;
        self.ui.selected = self
            .ui
            .selected
            .and_then(|s| store.index_of(s.key).map(|index| Selection { index, key: s.key }));
        self.ui.editing = self
            .ui
            .editing
            .take()
            .and_then(|s| store.index_of(s.key).map(|index| EditSession { index, ..s }));
        if let Mode::DraggingElement { key, offset, .. } = self.mode {
            self.mode = match store.index_of(key) {
                Some(index) => Mode::DraggingElement { index, key, offset },
                None => Mode::Idle,
            };
        }
    }
}
