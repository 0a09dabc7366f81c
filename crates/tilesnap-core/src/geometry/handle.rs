//! Resize handles and pointer hit testing.

use serde::{Deserialize, Serialize};

use super::{CropRect, Point};

/// One of the eight resize handles on the crop rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Handle {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Handle {
    /// All handles, corners first so hit testing prefers them over edges.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
        Handle::North,
        Handle::East,
        Handle::South,
        Handle::West,
    ];

    /// Where this handle sits on `rect`.
    pub fn position(self, rect: &CropRect) -> Point {
        let c = rect.center();
        match self {
            Handle::North => Point::new(c.x, rect.y),
            Handle::NorthEast => Point::new(rect.right(), rect.y),
            Handle::East => Point::new(rect.right(), c.y),
            Handle::SouthEast => Point::new(rect.right(), rect.bottom()),
            Handle::South => Point::new(c.x, rect.bottom()),
            Handle::SouthWest => Point::new(rect.x, rect.bottom()),
            Handle::West => Point::new(rect.x, c.y),
            Handle::NorthWest => Point::new(rect.x, rect.y),
        }
    }

    /// Short compass name ("n", "ne", ...) used by the browser cursor styles.
    pub fn as_str(self) -> &'static str {
        match self {
            Handle::North => "n",
            Handle::NorthEast => "ne",
            Handle::East => "e",
            Handle::SouthEast => "se",
            Handle::South => "s",
            Handle::SouthWest => "sw",
            Handle::West => "w",
            Handle::NorthWest => "nw",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Handle> {
        Handle::ALL.into_iter().find(|h| h.as_str() == name)
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(Handle),
    Body,
}

/// Find the handle or body under `p` (display space).
///
/// A handle is hit when the pointer is within `tolerance` of it. Corners are
/// checked first, then edge midpoints, then the rect interior.
pub fn hit_test(rect: &CropRect, p: Point, tolerance: f64) -> Option<HitTarget> {
    if rect.is_empty() {
        return None;
    }

    Handle::ALL
        .into_iter()
        .find(|h| h.position(rect).distance(p) <= tolerance)
        .map(HitTarget::Handle)
        .or_else(|| rect.contains(p).then_some(HitTarget::Body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CropRect {
        CropRect::new(100.0, 100.0, 160.0, 90.0)
    }

    #[test]
    fn test_handle_positions() {
        let r = rect();
        assert_eq!(Handle::NorthWest.position(&r), Point::new(100.0, 100.0));
        assert_eq!(Handle::SouthEast.position(&r), Point::new(260.0, 190.0));
        assert_eq!(Handle::North.position(&r), Point::new(180.0, 100.0));
        assert_eq!(Handle::West.position(&r), Point::new(100.0, 145.0));
    }

    #[test]
    fn test_hit_corner() {
        let hit = hit_test(&rect(), Point::new(258.0, 188.0), 10.0);
        assert_eq!(hit, Some(HitTarget::Handle(Handle::SouthEast)));
    }

    #[test]
    fn test_hit_edge_midpoint() {
        let hit = hit_test(&rect(), Point::new(181.0, 102.0), 10.0);
        assert_eq!(hit, Some(HitTarget::Handle(Handle::North)));
    }

    #[test]
    fn test_hit_body() {
        let hit = hit_test(&rect(), Point::new(150.0, 150.0), 10.0);
        assert_eq!(hit, Some(HitTarget::Body));
    }

    #[test]
    fn test_miss() {
        assert_eq!(hit_test(&rect(), Point::new(10.0, 10.0), 10.0), None);
        assert_eq!(
            hit_test(&CropRect::default(), Point::new(0.0, 0.0), 10.0),
            None
        );
    }

    #[test]
    fn test_corner_wins_over_edge_on_tiny_rect() {
        let tiny = CropRect::new(0.0, 0.0, 16.0, 9.0);
        let hit = hit_test(&tiny, Point::new(1.0, 1.0), 10.0);
        assert_eq!(hit, Some(HitTarget::Handle(Handle::NorthWest)));
    }

    #[test]
    fn test_handle_names_round_trip() {
        for h in Handle::ALL {
            assert_eq!(Handle::from_str_name(h.as_str()), Some(h));
        }
        assert_eq!(Handle::from_str_name("up"), None);
    }
}
