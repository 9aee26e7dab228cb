//! Pixel-space geometry: sizes, rectangles, and viewport frames.
//!
//! Unlike normalized UI coordinates, everything here is in pixels of some
//! concrete surface: either a decoded image or the viewport showing it.

use serde::{Deserialize, Serialize};

/// Width and height of an image or a rendered viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Either side is exactly zero (e.g. a view that has not been laid out).
    pub fn is_unset(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Width over height. Only meaningful when [`is_positive`](Self::is_positive).
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Uniformly scaled copy.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// A 2D pixel point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left and bottom-right corners.
///
/// Well-formed rectangles satisfy `x1 <= x2` and `y1 <= y2`. Malformed ones
/// are still carried through transforms untouched; callers that need a
/// drawable box use [`normalized`](Self::normalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle covering `(0, 0)` to `size`.
    pub fn from_size(size: Dimensions) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn is_well_formed(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Copy with corners swapped so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn top_left(&self) -> Point2D {
        Point2D::new(self.x1, self.y1)
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive),
    /// allowing `tolerance` pixels of floating-point slack.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x1 >= self.x1 - tolerance
            && other.y1 >= self.y1 - tolerance
            && other.x2 <= self.x2 + tolerance
            && other.y2 <= self.y2 + tolerance
    }

    /// Whether any corner falls outside `(0, 0)..=size`.
    pub fn exceeds(&self, size: Dimensions) -> bool {
        let r = self.normalized();
        r.x1 < 0.0 || r.y1 < 0.0 || r.x2 > size.width || r.y2 > size.height
    }

    /// Apply `p * scale + offset` to both corners independently.
    pub fn transformed(&self, scale: f64, offset: Point2D) -> Self {
        Self {
            x1: self.x1 * scale + offset.x,
            y1: self.y1 * scale + offset.y,
            x2: self.x2 * scale + offset.x,
            y2: self.y2 * scale + offset.y,
        }
    }
}

/// An image of known intrinsic size displayed inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFrame {
    /// Decoded pixel size of the image.
    pub image_intrinsic_size: Dimensions,
    /// Rendered size of the surface that shows it.
    pub viewport_size: Dimensions,
}

impl ViewportFrame {
    pub fn new(image_intrinsic_size: Dimensions, viewport_size: Dimensions) -> Self {
        Self {
            image_intrinsic_size,
            viewport_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validity() {
        assert!(Dimensions::new(640.0, 480.0).is_positive());
        assert!(!Dimensions::new(0.0, 480.0).is_positive());
        assert!(!Dimensions::new(-1.0, 480.0).is_positive());
        assert!(!Dimensions::new(f64::NAN, 480.0).is_positive());
        assert!(Dimensions::new(0.0, 0.0).is_unset());
        assert!(!Dimensions::new(-3.0, 2.0).is_unset());
    }

    #[test]
    fn test_aspect_ratio() {
        let d = Dimensions::new(640.0, 480.0);
        assert!((d.aspect_ratio() - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_normalized_swaps_corners() {
        let r = Rect::new(200.0, 50.0, 100.0, 10.0);
        assert!(!r.is_well_formed());
        let n = r.normalized();
        assert_eq!(n, Rect::new(100.0, 10.0, 200.0, 50.0));
        assert!(n.is_well_formed());
        assert!((n.width() - 100.0).abs() < 1e-9);
        assert!((n.height() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_exceeds() {
        let size = Dimensions::new(640.0, 480.0);
        assert!(!Rect::new(0.0, 0.0, 640.0, 480.0).exceeds(size));
        assert!(Rect::new(600.0, 10.0, 700.0, 40.0).exceeds(size));
        assert!(Rect::new(-1.0, 10.0, 20.0, 40.0).exceeds(size));
    }

    #[test]
    fn test_rect_transformed() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        let t = r.transformed(0.5, Point2D::new(10.0, 20.0));
        assert_eq!(t, Rect::new(60.0, 70.0, 110.0, 120.0));
    }

    #[test]
    fn test_rect_deserializes_integer_wire_values() {
        let r: Rect = serde_json::from_str(r#"{"x1":1,"y1":2,"x2":30,"y2":40}"#).unwrap();
        assert_eq!(r, Rect::new(1.0, 2.0, 30.0, 40.0));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            -5000.0f64..5000.0
        }

        fn rect() -> impl Strategy<Value = Rect> {
            (coord(), coord(), coord(), coord())
                .prop_map(|(x1, y1, x2, y2)| Rect::new(x1, y1, x2, y2))
        }

        proptest! {
            #[test]
            fn normalized_is_idempotent_and_well_formed(r in rect()) {
                let n = r.normalized();
                prop_assert!(n.is_well_formed());
                prop_assert_eq!(n.normalized(), n);
                prop_assert!(n.width() >= 0.0 && n.height() >= 0.0);
                prop_assert_eq!(n.top_left(), Point2D::new(r.x1.min(r.x2), r.y1.min(r.y2)));
            }

            #[test]
            fn transform_scales_extent(
                r in rect(),
                scale in 0.01f64..10.0,
                dx in coord(),
                dy in coord(),
            ) {
                let t = r.transformed(scale, Point2D::new(dx, dy));
                let tol = 1e-9 * (1.0 + r.width().abs().max(r.height().abs()) * scale);
                prop_assert!((t.width() - r.width() * scale).abs() < tol.max(1e-6));
                prop_assert!((t.height() - r.height() * scale).abs() < tol.max(1e-6));
                prop_assert_eq!(t.is_well_formed(), r.is_well_formed());
            }

            #[test]
            fn serde_keeps_corners(r in rect()) {
                let json = serde_json::to_string(&r).unwrap();
                let back: Rect = serde_json::from_str(&json).unwrap();
                prop_assert!((back.x1 - r.x1).abs() < 1e-9);
                prop_assert!((back.y1 - r.y1).abs() < 1e-9);
                prop_assert!((back.x2 - r.x2).abs() < 1e-9);
                prop_assert!((back.y2 - r.y2).abs() < 1e-9);
            }
        }
    }
}
