//! Scene derivation: a flat, host-agnostic description of what to draw.
//!
//! The host (DOM, terminal, test) turns a [`Scene`] into pixels. Nothing in
//! here mutates the controller.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::PLACEHOLDER_TEXT;
use crate::controller::Controller;
use crate::doc::{ElementKind, SyncState};
use crate::input::Tool;
use crate::viewport::{GridPattern, Point, Viewport};

/// Items offered by the context menu, in display order.
pub const CONTEXT_MENU_ITEMS: [ElementKind; 3] = [ElementKind::Note, ElementKind::Task, ElementKind::Heading];

/// How a single element should be drawn.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    /// Store index, for routing checkbox and editor events back.
    pub index: usize,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    /// Content, or the placeholder when content is empty.
    pub text: String,
    pub is_placeholder: bool,
    /// Whether the element carries a checkbox.
    pub has_checkbox: bool,
    pub completed: bool,
    pub selected: bool,
    pub editing: bool,
    pub dragging: bool,
    pub sync: SyncState,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub grid: GridPattern,
    /// Zoom indicator text, e.g. `"110%"`.
    pub zoom_label: String,
    pub panning: bool,
    pub tool: Tool,
    /// Elements in draw order.
    pub elements: Vec<ElementView>,
    /// Screen anchor of the open context menu.
    pub context_menu: Option<Point>,
}

/// Build the scene for the controller's current state.
#[must_use]
pub fn build_scene(controller: &Controller) -> Scene {
    let selected = controller.selected_index();
    let editing = controller.editing_index();
    let dragging = controller.dragging_index();

    let elements = controller
        .store
        .draw_order()
        .into_iter()
        .filter_map(|index| {
            let entry = controller.store.entry(index)?;
            let el = &entry.element;
            let is_placeholder = el.content.is_empty();
            let has_checkbox = match el.kind {
                ElementKind::Task => true,
                ElementKind::Note | ElementKind::Heading => false,
            };
            Some(ElementView {
                index,
                kind: el.kind,
                x: el.x,
                y: el.y,
                width: el.width,
                height: el.height,
                z_index: el.z_index,
                text: if is_placeholder { PLACEHOLDER_TEXT.to_string() } else { el.content.clone() },
                is_placeholder,
                has_checkbox,
                completed: has_checkbox && el.completed,
                selected: selected == Some(index),
                editing: editing == Some(index),
                dragging: dragging == Some(index),
                sync: entry.sync,
            })
        })
        .collect();

    let viewport = controller.viewport();
    Scene {
        viewport,
        grid: viewport.grid(),
        zoom_label: format!("{}%", viewport.zoom_percent()),
        panning: controller.is_panning(),
        tool: controller.ui.tool,
        elements,
        context_menu: controller.ui.context_menu.map(|m| m.screen),
    }
}
