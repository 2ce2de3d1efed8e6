//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the viewport allows.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the viewport allows.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplier applied per wheel notch when zooming in (divided when zooming out).
pub const ZOOM_STEP: f64 = 1.1;

// ── Grid ────────────────────────────────────────────────────────

/// Background grid period in canvas units at zoom 1.0.
pub const GRID_SIZE: f64 = 20.0;

// ── Element geometry ────────────────────────────────────────────

/// Default width for notes and tasks.
pub const NOTE_WIDTH: f64 = 200.0;

/// Default height for notes and tasks.
pub const NOTE_HEIGHT: f64 = 60.0;

/// Default width for headings.
pub const HEADING_WIDTH: f64 = 300.0;

/// Default height for headings.
pub const HEADING_HEIGHT: f64 = 40.0;

// ── Presentation ────────────────────────────────────────────────

/// Text shown in place of empty element content.
pub const PLACEHOLDER_TEXT: &str = "Double-click to edit...";
