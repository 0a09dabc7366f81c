//! Value types shared by the geometry engine and the interaction controller.

use serde::{Deserialize, Serialize};

/// A position in container or display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A width/height pair in floating-point pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or NaN.
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The user-adjustable crop rectangle, in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height, or 0 for an empty rect.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when the rect lies inside `[0, bounds.width] x [0, bounds.height]`,
    /// allowing `epsilon` of floating-point slack.
    pub fn is_within(&self, bounds: Size, epsilon: f64) -> bool {
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= bounds.width + epsilon
            && self.bottom() <= bounds.height + epsilon
    }

    /// Scale position and size about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// A crop region in natural image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Mapping from natural image pixels to display pixels.
///
/// `display = natural * scale`, and the displayed image starts at
/// `(offset_x, offset_y)` in container space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DisplayTransform {
    /// Fit `natural` inside `container`, centered, never upscaling past 1.0.
    ///
    /// Returns the all-zero transform when either size is empty.
    pub fn fit(natural: Size, container: Size) -> Self {
        Self::fit_zoomed(natural, container, 1.0)
    }

    /// Like [`DisplayTransform::fit`], then multiplied by `zoom`.
    ///
    /// Zoom is the only way the scale can exceed 1.0. A zoomed image may be
    /// larger than the container, in which case the offsets go negative.
    pub fn fit_zoomed(natural: Size, container: Size, zoom: f64) -> Self {
        if natural.is_empty() || container.is_empty() || !(zoom > 0.0) {
            return Self::default();
        }

        let fit = (container.width / natural.width)
            .min(container.height / natural.height)
            .min(1.0);
        let scale = fit * zoom;

        Self {
            scale,
            offset_x: (container.width - natural.width * scale) / 2.0,
            offset_y: (container.height - natural.height * scale) / 2.0,
        }
    }

    /// True for the inert transform produced by empty inputs.
    pub fn is_inert(&self) -> bool {
        !(self.scale > 0.0)
    }

    /// Size of the displayed image.
    pub fn display_size(&self, natural: Size) -> Size {
        Size::new(natural.width * self.scale, natural.height * self.scale)
    }

    /// Convert a container-space point into display space.
    pub fn container_to_display(&self, p: Point) -> Point {
        Point::new(p.x - self.offset_x, p.y - self.offset_y)
    }

    /// Map a display-space crop rect back to natural pixels.
    ///
    /// Divides by the scale, rounds to whole pixels and clamps to the
    /// natural image. Returns an empty rect for an inert transform.
    pub fn to_natural(&self, rect: &CropRect, natural: Size) -> PixelRect {
        if self.is_inert() || natural.is_empty() || rect.is_empty() {
            return PixelRect::default();
        }

        let max_w = natural.width.round() as u32;
        let max_h = natural.height.round() as u32;

        let x = ((rect.x / self.scale).round().max(0.0) as u32).min(max_w);
        let y = ((rect.y / self.scale).round().max(0.0) as u32).min(max_h);
        let width = ((rect.width / self.scale).round().max(0.0) as u32).min(max_w - x);
        let height = ((rect.height / self.scale).round().max(0.0) as u32).min(max_h - y);

        PixelRect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_downscales_to_container() {
        let t = DisplayTransform::fit(Size::new(2000.0, 1000.0), Size::new(1000.0, 800.0));
        assert!((t.scale - 0.5).abs() < 1e-12);
        assert!((t.offset_x - 0.0).abs() < 1e-12);
        assert!((t.offset_y - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_never_upscales() {
        let t = DisplayTransform::fit(Size::new(400.0, 300.0), Size::new(1000.0, 800.0));
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, 300.0);
        assert_eq!(t.offset_y, 250.0);
    }

    #[test]
    fn test_zoom_can_exceed_one() {
        let t = DisplayTransform::fit_zoomed(Size::new(400.0, 300.0), Size::new(1000.0, 800.0), 2.0);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.display_size(Size::new(400.0, 300.0)), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_empty_inputs_are_inert() {
        let t = DisplayTransform::fit(Size::new(0.0, 0.0), Size::new(100.0, 100.0));
        assert!(t.is_inert());
        assert_eq!(t, DisplayTransform::default());

        let t = DisplayTransform::fit(Size::new(100.0, 100.0), Size::new(0.0, 50.0));
        assert!(t.is_inert());
    }

    #[test]
    fn test_to_natural_divides_by_scale() {
        let t = DisplayTransform {
            scale: 0.5,
            offset_x: 0.0,
            offset_y: 150.0,
        };
        let rect = CropRect::new(50.0, 25.0, 607.0, 341.5);
        let natural = t.to_natural(&rect, Size::new(2000.0, 1000.0));
        assert_eq!(natural, PixelRect::new(100, 50, 1214, 683));
    }

    #[test]
    fn test_to_natural_clamps_to_image() {
        let t = DisplayTransform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let rect = CropRect::new(90.0, 90.0, 50.0, 50.0);
        let natural = t.to_natural(&rect, Size::new(100.0, 100.0));
        assert_eq!(natural, PixelRect::new(90, 90, 10, 10));
    }

    #[test]
    fn test_to_natural_inert() {
        let rect = CropRect::new(0.0, 0.0, 10.0, 10.0);
        let natural = DisplayTransform::default().to_natural(&rect, Size::new(10.0, 10.0));
        assert!(natural.is_empty());
    }

    #[test]
    fn test_container_to_display() {
        let t = DisplayTransform {
            scale: 1.0,
            offset_x: 20.0,
            offset_y: 10.0,
        };
        assert_eq!(t.container_to_display(Point::new(25.0, 15.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_crop_rect_helpers() {
        let r = CropRect::new(10.0, 20.0, 160.0, 90.0);
        assert_eq!(r.right(), 170.0);
        assert_eq!(r.bottom(), 110.0);
        assert_eq!(r.center(), Point::new(90.0, 65.0));
        assert!((r.aspect_ratio() - 16.0 / 9.0).abs() < 1e-12);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(!r.contains(Point::new(171.0, 20.0)));
        assert!(r.is_within(Size::new(170.0, 110.0), 0.0));
        assert!(!r.is_within(Size::new(169.0, 110.0), 0.0));
    }
}
