//! Exploration viewport: scale, pan and drag bookkeeping for the artwork
//! canvas. Lives in a `use_mut_ref` so pointer-move handlers mutate it
//! without forcing a re-render; the draw closure reads it on demand.

use crate::geometry::{self, Point, Size};

#[derive(Debug, Clone)]
pub struct Viewport {
    /// Scale at which the whole image fits the canvas. 0.0 until both the
    /// canvas size and the image natural size are known ("not ready").
    pub fit: f64,
    /// User zoom relative to fit scale, clamped by the tuning bounds.
    pub zoom_factor: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub natural: Size,
    pub canvas: Size,

    pub dragging: bool,
    /// Pointer position at drag start, offset by the pan at that moment.
    drag_origin_x: f64,
    drag_origin_y: f64,
    /// Screen position where the drag began, for click disambiguation.
    drag_start_x: f64,
    drag_start_y: f64,
    pub drag_distance: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            fit: 0.0,
            zoom_factor: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            natural: Size::default(),
            canvas: Size::default(),
            dragging: false,
            drag_origin_x: 0.0,
            drag_origin_y: 0.0,
            drag_start_x: 0.0,
            drag_start_y: 0.0,
            drag_distance: 0.0,
        }
    }
}

impl Viewport {
    /// Scale is only meaningful once both sizes are measured; drawing is
    /// suppressed until then to avoid a frame of a wrongly sized image.
    pub fn ready(&self) -> bool {
        self.fit > 0.0
    }

    pub fn scale(&self) -> f64 {
        self.fit * self.zoom_factor
    }

    /// Recompute the fit scale from fresh measurements. `zoom_bias` only
    /// applies the first time the viewport becomes ready, so a window resize
    /// mid-exploration keeps the user's zoom. The existing pan is re-clamped
    /// against the new scaled size so a shrink cannot leave it out of bounds.
    pub fn measure(&mut self, canvas: Size, natural: Size, zoom_bias: f64, clamp_factor: f64) {
        let was_ready = self.ready();
        self.canvas = canvas;
        self.natural = natural;
        self.fit = geometry::fit_scale(canvas, natural);
        if self.ready() && !was_ready {
            self.zoom_factor = zoom_bias;
        }
        if self.ready() {
            let clamped = geometry::clamp_pan(
                Point { x: self.pan_x, y: self.pan_y },
                self.scaled_size(),
                clamp_factor,
            );
            self.pan_x = clamped.x;
            self.pan_y = clamped.y;
        }
    }

    pub fn scaled_size(&self) -> Size {
        Size {
            width: self.natural.width * self.scale(),
            height: self.natural.height * self.scale(),
        }
    }

    /// Top-left of the drawn image in canvas pixels (image centered, then
    /// offset by pan).
    pub fn draw_origin(&self) -> Point {
        let scaled = self.scaled_size();
        Point {
            x: (self.canvas.width - scaled.width) / 2.0 + self.pan_x,
            y: (self.canvas.height - scaled.height) / 2.0 + self.pan_y,
        }
    }

    /// Canvas pixel position of a percentage-space point.
    pub fn screen_from_percent(&self, pct: Point) -> Point {
        let origin = self.draw_origin();
        let scaled = self.scaled_size();
        Point {
            x: origin.x + pct.x / 100.0 * scaled.width,
            y: origin.y + pct.y / 100.0 * scaled.height,
        }
    }

    /// Percentage-space position of a canvas pixel, or None while not ready.
    pub fn percent_from_screen(&self, screen: Point) -> Option<Point> {
        if !self.ready() {
            return None;
        }
        let origin = self.draw_origin();
        let scaled = self.scaled_size();
        Some(Point {
            x: (screen.x - origin.x) / scaled.width * 100.0,
            y: (screen.y - origin.y) / scaled.height * 100.0,
        })
    }

    // ---------------- Drag -----------------

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.drag_origin_x = x - self.pan_x;
        self.drag_origin_y = y - self.pan_y;
        self.drag_start_x = x;
        self.drag_start_y = y;
        self.drag_distance = 0.0;
    }

    pub fn drag_to(&mut self, x: f64, y: f64, clamp_factor: f64) {
        if !self.dragging {
            return;
        }
        self.drag_distance = geometry::euclidean_distance(
            Point { x, y },
            Point { x: self.drag_start_x, y: self.drag_start_y },
        );
        let proposed = Point {
            x: x - self.drag_origin_x,
            y: y - self.drag_origin_y,
        };
        let clamped = geometry::clamp_pan(proposed, self.scaled_size(), clamp_factor);
        self.pan_x = clamped.x;
        self.pan_y = clamped.y;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// A pointer-up counts as a click while accumulated travel stays small.
    pub fn is_click(&self, threshold_px: f64) -> bool {
        self.drag_distance <= threshold_px
    }

    /// Screen point where the current drag began; the hit-test point when the
    /// gesture turns out to be a click.
    pub fn drag_start(&self) -> Point {
        Point {
            x: self.drag_start_x,
            y: self.drag_start_y,
        }
    }

    // ---------------- Zoom -----------------

    /// Wheel zoom anchored at the cursor: the image point under the pointer
    /// stays put while the zoom factor changes.
    pub fn zoom_around(
        &mut self,
        cursor: Point,
        delta_y: f64,
        min_factor: f64,
        max_factor: f64,
        clamp_factor: f64,
    ) {
        if !self.ready() {
            return;
        }
        let old_scale = self.scale();
        let origin = self.draw_origin();
        let image_x = (cursor.x - origin.x) / old_scale;
        let image_y = (cursor.y - origin.y) / old_scale;
        let change = (-delta_y * 0.001).exp();
        self.zoom_factor = (self.zoom_factor * change).clamp(min_factor, max_factor);
        self.anchor(cursor, image_x, image_y, clamp_factor);
    }

    /// Pinch zoom: scale by the ratio of pinch distances from `start_factor`.
    pub fn pinch_to(
        &mut self,
        midpoint: Point,
        image_x: f64,
        image_y: f64,
        start_factor: f64,
        dist_ratio: f64,
        min_factor: f64,
        max_factor: f64,
        clamp_factor: f64,
    ) {
        if !self.ready() {
            return;
        }
        self.zoom_factor = (start_factor * dist_ratio).clamp(min_factor, max_factor);
        self.anchor(midpoint, image_x, image_y, clamp_factor);
    }

    fn anchor(&mut self, cursor: Point, image_x: f64, image_y: f64, clamp_factor: f64) {
        let new_scale = self.scale();
        let scaled = self.scaled_size();
        // Solve pan so the anchored image pixel lands back under the cursor.
        let target_origin_x = cursor.x - image_x * new_scale;
        let target_origin_y = cursor.y - image_y * new_scale;
        let proposed = Point {
            x: target_origin_x - (self.canvas.width - scaled.width) / 2.0,
            y: target_origin_y - (self.canvas.height - scaled.height) / 2.0,
        };
        let clamped = geometry::clamp_pan(proposed, scaled, clamp_factor);
        self.pan_x = clamped.x;
        self.pan_y = clamped.y;
    }

    pub fn reset_pan(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_viewport() -> Viewport {
        let mut vp = Viewport::default();
        vp.measure(
            Size { width: 800.0, height: 600.0 },
            Size { width: 1600.0, height: 1200.0 },
            1.2,
            0.75,
        );
        vp
    }

    #[test]
    fn not_ready_until_measured() {
        let mut vp = Viewport::default();
        assert!(!vp.ready());
        assert!(vp.percent_from_screen(Point { x: 10.0, y: 10.0 }).is_none());
        vp.measure(
            Size { width: 800.0, height: 600.0 },
            Size { width: 0.0, height: 0.0 },
            1.2,
            0.75,
        );
        assert!(!vp.ready());
    }

    #[test]
    fn measure_applies_zoom_bias_once() {
        let mut vp = ready_viewport();
        assert_eq!(vp.fit, 0.5);
        assert_eq!(vp.zoom_factor, 1.2);
        vp.zoom_factor = 2.0;
        // Resize keeps user zoom.
        vp.measure(
            Size { width: 400.0, height: 300.0 },
            Size { width: 1600.0, height: 1200.0 },
            1.2,
            0.75,
        );
        assert_eq!(vp.zoom_factor, 2.0);
    }

    #[test]
    fn measure_reclamps_pan_after_shrink() {
        let mut vp = ready_viewport();
        // Drag to the clamp boundary at the original size.
        vp.begin_drag(0.0, 0.0);
        vp.drag_to(100_000.0, 100_000.0, 0.75);
        vp.end_drag();
        // Shrink the window: the old pan exceeds the new bounds.
        vp.measure(
            Size { width: 200.0, height: 150.0 },
            Size { width: 1600.0, height: 1200.0 },
            1.2,
            0.75,
        );
        let scaled = vp.scaled_size();
        assert!(vp.pan_x.abs() <= scaled.width * 0.75);
        assert!(vp.pan_y.abs() <= scaled.height * 0.75);
    }

    #[test]
    fn screen_percent_round_trip() {
        let vp = ready_viewport();
        let pct = Point { x: 25.0, y: 75.0 };
        let screen = vp.screen_from_percent(pct);
        let back = vp.percent_from_screen(screen).unwrap();
        assert!((back.x - pct.x).abs() < 1e-9);
        assert!((back.y - pct.y).abs() < 1e-9);
    }

    #[test]
    fn drag_is_clamped() {
        let mut vp = ready_viewport();
        vp.begin_drag(100.0, 100.0);
        vp.drag_to(100_000.0, -100_000.0, 0.75);
        let scaled = vp.scaled_size();
        assert!(vp.pan_x.abs() <= scaled.width * 0.75);
        assert!(vp.pan_y.abs() <= scaled.height * 0.75);
        assert!(vp.drag_distance > 5.0);
    }

    #[test]
    fn small_drag_counts_as_click() {
        let mut vp = ready_viewport();
        vp.begin_drag(100.0, 100.0);
        vp.drag_to(103.0, 100.0, 0.75);
        vp.end_drag();
        assert!(vp.is_click(5.0));
        vp.begin_drag(100.0, 100.0);
        vp.drag_to(100.0, 108.0, 0.75);
        assert!(!vp.is_click(5.0));
    }

    #[test]
    fn wheel_zoom_respects_bounds() {
        let mut vp = ready_viewport();
        let cursor = Point { x: 400.0, y: 300.0 };
        for _ in 0..200 {
            vp.zoom_around(cursor, -120.0, 0.5, 4.0, 0.75);
        }
        assert_eq!(vp.zoom_factor, 4.0);
        for _ in 0..400 {
            vp.zoom_around(cursor, 120.0, 0.5, 4.0, 0.75);
        }
        assert_eq!(vp.zoom_factor, 0.5);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut vp = ready_viewport();
        let cursor = Point { x: 250.0, y: 180.0 };
        let before = vp.percent_from_screen(cursor).unwrap();
        vp.zoom_around(cursor, -60.0, 0.5, 4.0, 10.0); // wide clamp: no snap
        let after = vp.percent_from_screen(cursor).unwrap();
        assert!((before.x - after.x).abs() < 1e-6);
        assert!((before.y - after.y).abs() < 1e-6);
    }
}
