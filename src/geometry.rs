//! Percentage-space geometry helpers.
//!
//! Hotspot and quiz coordinates are expressed as 0-100 fractions of the
//! artwork's intrinsic width/height, independent of on-screen zoom and pan.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Circle in percentage-space; `radius` is a percentage of the image width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn center(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

/// Rectangle in percentage-space (top-left anchored).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Largest scale at which the whole image fits in the container without
/// cropping. Returns 0.0 on degenerate input so callers can treat "not yet
/// measured" as "not ready" instead of dividing by zero.
pub fn fit_scale(container: Size, natural: Size) -> f64 {
    if container.is_degenerate() || natural.is_degenerate() {
        return 0.0;
    }
    (container.width / natural.width).min(container.height / natural.height)
}

/// Clamp a proposed pixel pan offset so the image cannot be dragged more
/// than `scaled_size * clamp_factor` off-center on either axis.
pub fn clamp_pan(proposed: Point, scaled_size: Size, clamp_factor: f64) -> Point {
    let max_x = scaled_size.width * clamp_factor;
    let max_y = scaled_size.height * clamp_factor;
    Point {
        x: proposed.x.clamp(-max_x, max_x),
        y: proposed.y.clamp(-max_y, max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point { x: 0.0, y: 0.0 };
        let b = Point { x: 3.0, y: 4.0 };
        assert_eq!(euclidean_distance(a, b), 5.0);
        assert_eq!(euclidean_distance(b, b), 0.0);
    }

    #[test]
    fn fit_scale_picks_limiting_axis() {
        let container = Size { width: 800.0, height: 600.0 };
        let wide = Size { width: 1600.0, height: 400.0 };
        let tall = Size { width: 400.0, height: 1200.0 };
        assert_eq!(fit_scale(container, wide), 0.5);
        assert_eq!(fit_scale(container, tall), 0.5);
    }

    #[test]
    fn fit_scale_degenerate_input_is_zero() {
        let ok = Size { width: 800.0, height: 600.0 };
        let zero = Size { width: 0.0, height: 600.0 };
        assert_eq!(fit_scale(zero, ok), 0.0);
        assert_eq!(fit_scale(ok, zero), 0.0);
        assert_eq!(fit_scale(ok, Size::default()), 0.0);
    }

    #[test]
    fn pan_clamp_boundary() {
        let scaled = Size { width: 1000.0, height: 500.0 };
        let factor = 0.75;
        let cases = [
            Point { x: 0.0, y: 0.0 },
            Point { x: 10_000.0, y: -10_000.0 },
            Point { x: -751.0, y: 376.0 },
            Point { x: 750.0, y: -375.0 },
        ];
        for proposed in cases {
            let p = clamp_pan(proposed, scaled, factor);
            assert!(p.x.abs() <= scaled.width * factor);
            assert!(p.y.abs() <= scaled.height * factor);
        }
        // In-range offsets pass through untouched.
        let inside = Point { x: 100.0, y: -50.0 };
        assert_eq!(clamp_pan(inside, scaled, factor), inside);
    }
}
