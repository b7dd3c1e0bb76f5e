use log::debug;
use serde::Serialize;

use crate::{BoundingBox, Point};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
/// Per-notch factor for wheel zoom.
pub const WHEEL_SCALE_BY: f64 = 1.1;
/// Per-press factor for the zoom buttons.
pub const STEP_SCALE_BY: f64 = 1.2;
/// Offset after a reset; leaves room for the round header row.
pub const DEFAULT_OFFSET: Point = Point::new(0.0, 50.0);

pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Pointer-anchored wheel zoom.
///
/// Positive `delta_y` zooms in by [`WHEEL_SCALE_BY`], anything else zooms out.
/// The tree-space point under `pointer` stays under `pointer`:
/// `(pointer - offset) / scale == (pointer - new_offset) / new_scale`.
pub fn handle_wheel(pointer: Point, delta_y: f64, scale: f64, offset: Point) -> (f64, Point) {
    let new_scale = if delta_y > 0.0 {
        scale * WHEEL_SCALE_BY
    } else {
        scale / WHEEL_SCALE_BY
    };
    let new_scale = clamp_scale(new_scale);

    let anchor = Point::new((pointer.x - offset.x) / scale, (pointer.y - offset.y) / scale);
    let new_offset = Point::new(pointer.x - anchor.x * new_scale, pointer.y - anchor.y * new_scale);
    (new_scale, new_offset)
}

// ---------------------------------------------------------------------------
// Viewport — uniform scale + translate over the whole tree
// ---------------------------------------------------------------------------

/// `screen = tree * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Viewport {
    pub fn wheel(&mut self, pointer: Point, delta_y: f64) {
        let (scale, offset) = handle_wheel(pointer, delta_y, self.scale, self.offset);
        self.scale = scale;
        self.offset = offset;
    }

    pub fn zoom_in(&mut self) {
        self.scale = clamp_scale(self.scale * STEP_SCALE_BY);
    }

    pub fn zoom_out(&mut self) {
        self.scale = clamp_scale(self.scale / STEP_SCALE_BY);
    }

    pub fn reset_zoom(&mut self) {
        *self = Self::default();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Scale a `content_width` x `content_height` box to fit inside the
    /// viewport minus `padding` on every side, and center it.
    ///
    /// The fitted scale is not clamped. Zero-sized content leaves the viewport
    /// untouched.
    pub fn fit_to_screen(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        content_width: f64,
        content_height: f64,
        padding: f64,
    ) {
        if content_width == 0.0 || content_height == 0.0 {
            return;
        }
        let scale_x = (viewport_width - 2.0 * padding) / content_width;
        let scale_y = (viewport_height - 2.0 * padding) / content_height;
        self.scale = scale_x.min(scale_y);
        self.offset = Point::new(
            (viewport_width - content_width * self.scale) / 2.0,
            (viewport_height - content_height * self.scale) / 2.0,
        );
        debug!("fit to {viewport_width}x{viewport_height}: scale {:.3}", self.scale);
    }

    /// [`Self::fit_to_screen`] for a box that need not start at the origin.
    pub fn fit_content(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        bounds: &BoundingBox,
        padding: f64,
    ) {
        if bounds.width == 0.0 || bounds.height == 0.0 {
            return;
        }
        self.fit_to_screen(viewport_width, viewport_height, bounds.width, bounds.height, padding);
        self.offset.x -= bounds.min_x * self.scale;
        self.offset.y -= bounds.min_y * self.scale;
    }

    pub fn tree_to_screen(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.offset.x,
            point.y * self.scale + self.offset.y,
        )
    }

    pub fn screen_to_tree(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset.x) / self.scale,
            (point.y - self.offset.y) / self.scale,
        )
    }
}
