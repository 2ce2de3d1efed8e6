#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a wheel `dy` to a zoom direction. Scrolling down (positive) zooms out.
    #[must_use]
    pub fn from_wheel(dy: f64) -> Self {
        if dy > 0.0 { Self::Out } else { Self::In }
    }

    fn factor(self) -> f64 {
        match self {
            Self::In => ZOOM_STEP,
            Self::Out => 1.0 / ZOOM_STEP,
        }
    }
}

/// Background grid derived from the viewport. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPattern {
    /// Screen-space distance between grid lines.
    pub period: f64,
    /// Horizontal offset of the first grid line.
    pub phase_x: f64,
    /// Vertical offset of the first grid line.
    pub phase_y: f64,
}

/// Pan/zoom state for the infinite canvas.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom), always within `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Zoom one step around `screen`, keeping the canvas point under it fixed.
    pub fn zoom_at(&mut self, screen: Point, direction: ZoomDirection) {
        let new_zoom = (self.zoom * direction.factor()).clamp(ZOOM_MIN, ZOOM_MAX);
        let ratio = new_zoom / self.zoom;
        self.pan_x = screen.x - (screen.x - self.pan_x) * ratio;
        self.pan_y = screen.y - (screen.y - self.pan_y) * ratio;
        self.zoom = new_zoom;
    }

    /// Shift the view by a screen-space delta. Not scaled by zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Restore zoom 1.0 and zero pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Grid period and phase for the current pan/zoom.
    #[must_use]
    pub fn grid(&self) -> GridPattern {
        let period = GRID_SIZE * self.zoom;
        GridPattern { period, phase_x: self.pan_x % period, phase_y: self.pan_y % period }
    }

    /// Zoom as a whole percentage, as shown in the zoom indicator.
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.zoom * 100.0).round() as i64;
        pct
    }
}
