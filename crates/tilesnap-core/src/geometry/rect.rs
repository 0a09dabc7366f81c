//! Aspect-locked crop rect operations.
//!
//! The rect keeps `width / height == ASPECT_RATIO` through every operation.
//! Resizing pins the edge or corner opposite the dragged handle, and when
//! the pointer asks for more room than the display has, whichever bound is
//! tighter decides the size.

use super::{CropRect, Handle, Point, Size};
use crate::config::ASPECT_RATIO;

/// Centered initial crop rect filling `fill` of the display.
///
/// Each axis is bounded by `fill` of its own display dimension, not of the
/// smaller one: start from `fill * display.width`, derive the height from
/// the ratio, and fall back to `fill * display.height` when that height
/// would overflow. On a 16:9-or-wider display this fills `fill` of the
/// height; on a narrower one, `fill` of the width.
pub fn initial_crop_rect(display: Size, fill: f64) -> CropRect {
    if display.is_empty() {
        return CropRect::default();
    }

    let max_width = display.width * fill;
    let max_height = display.height * fill;

    let mut width = max_width;
    let mut height = width / ASPECT_RATIO;
    if height > max_height {
        height = max_height;
        width = height * ASPECT_RATIO;
    }

    CropRect::new(
        (display.width - width) / 2.0,
        (display.height - height) / 2.0,
        width,
        height,
    )
}

/// Translate the rect by `(dx, dy)`, keeping it inside `bounds`.
///
/// x and y are clamped independently; the size never changes.
pub fn move_rect(rect: &CropRect, dx: f64, dy: f64, bounds: Size) -> CropRect {
    if bounds.is_empty() {
        return CropRect::default();
    }

    CropRect::new(
        place(rect.x + dx, rect.width, bounds.width),
        place(rect.y + dy, rect.height, bounds.height),
        rect.width,
        rect.height,
    )
}

/// Resize by dragging `handle` to `pointer` (display space).
///
/// The opposite corner (or edge) stays fixed. Corner and E/W handles derive
/// the height from the width; N/S handles derive the width from the height.
/// Edge handles keep the rect centered on the other axis. The width never
/// drops below `min_width` unless the display itself is narrower.
pub fn resize_rect(
    rect: &CropRect,
    handle: Handle,
    pointer: Point,
    bounds: Size,
    min_width: f64,
) -> CropRect {
    if bounds.is_empty() {
        return CropRect::default();
    }

    let r = ASPECT_RATIO;
    let min_width = min_width.max(0.0);
    let min_height = min_width / r;

    match handle {
        Handle::SouthEast => {
            let (ax, ay) = (rect.x, rect.y);
            let max_w = (bounds.width - ax).min((bounds.height - ay) * r);
            let w = limit(pointer.x - ax, min_width, max_w);
            CropRect::new(ax, ay, w, w / r)
        }
        Handle::SouthWest => {
            let (ax, ay) = (rect.right(), rect.y);
            let max_w = ax.min((bounds.height - ay) * r);
            let w = limit(ax - pointer.x, min_width, max_w);
            CropRect::new(ax - w, ay, w, w / r)
        }
        Handle::NorthEast => {
            let (ax, ay) = (rect.x, rect.bottom());
            let max_w = (bounds.width - ax).min(ay * r);
            let w = limit(pointer.x - ax, min_width, max_w);
            let h = w / r;
            CropRect::new(ax, ay - h, w, h)
        }
        Handle::NorthWest => {
            let (ax, ay) = (rect.right(), rect.bottom());
            let max_w = ax.min(ay * r);
            let w = limit(ax - pointer.x, min_width, max_w);
            let h = w / r;
            CropRect::new(ax - w, ay - h, w, h)
        }
        Handle::East => {
            let ax = rect.x;
            let cy = rect.center().y;
            let max_w = (bounds.width - ax).min(bounds.height * r);
            let w = limit(pointer.x - ax, min_width, max_w);
            let h = w / r;
            CropRect::new(ax, place(cy - h / 2.0, h, bounds.height), w, h)
        }
        Handle::West => {
            let ax = rect.right();
            let cy = rect.center().y;
            let max_w = ax.min(bounds.height * r);
            let w = limit(ax - pointer.x, min_width, max_w);
            let h = w / r;
            CropRect::new(ax - w, place(cy - h / 2.0, h, bounds.height), w, h)
        }
        Handle::South => {
            let ay = rect.y;
            let cx = rect.center().x;
            let max_h = (bounds.height - ay).min(bounds.width / r);
            let h = limit(pointer.y - ay, min_height, max_h);
            let w = h * r;
            CropRect::new(place(cx - w / 2.0, w, bounds.width), ay, w, h)
        }
        Handle::North => {
            let ay = rect.bottom();
            let cx = rect.center().x;
            let max_h = ay.min(bounds.width / r);
            let h = limit(ay - pointer.y, min_height, max_h);
            let w = h * r;
            CropRect::new(place(cx - w / 2.0, w, bounds.width), ay - h, w, h)
        }
    }
}

/// Shrink (never grow) the rect until it fits `bounds`, then move it inside.
///
/// The ratio is preserved: if the width fits but the derived height does
/// not, the height bound wins, and vice versa.
pub fn clamp_rect(rect: &CropRect, bounds: Size) -> CropRect {
    if bounds.is_empty() || rect.is_empty() {
        return CropRect::default();
    }
    if rect.is_within(bounds, 0.0) {
        return *rect;
    }

    let width = rect
        .width
        .min(bounds.width)
        .min(bounds.height * ASPECT_RATIO);
    let height = width / ASPECT_RATIO;

    CropRect::new(
        place(rect.x, width, bounds.width),
        place(rect.y, height, bounds.height),
        width,
        height,
    )
}

/// Clamp a leading edge so `[start, start + len]` stays in `[0, limit]`.
#[inline]
fn place(start: f64, len: f64, limit: f64) -> f64 {
    start.min(limit - len).max(0.0)
}

/// Apply the size floor, then the room bound. Room wins when they conflict.
#[inline]
fn limit(requested: f64, floor: f64, room: f64) -> f64 {
    requested.max(floor).min(room).max(0.0)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
