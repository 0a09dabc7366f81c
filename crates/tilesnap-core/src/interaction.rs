//! Crop interaction controller.
//!
//! Turns pointer and touch events into geometry calls. Positions come in
//! container space; the controller maps them into display space (origin at
//! the displayed image's top-left) before touching the crop rect.
//!
//! Movement is incremental: every move is applied as a delta from the last
//! recorded position, which is then updated.

use crate::config::TileConfig;
use crate::decode::DecodedImage;
use crate::geometry::{
    clamp_rect, hit_test, initial_crop_rect, move_rect, resize_rect, CropRect, DisplayTransform,
    Handle, HitTarget, PixelRect, Point, Size,
};
use crate::transform::{confirm_crop, ConfirmedCrop, CropError};

/// The active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    Resizing(Handle),
}

impl GestureState {
    pub fn is_active(self) -> bool {
        self != GestureState::Idle
    }
}

/// Stateful crop editor for one loaded image.
#[derive(Debug, Clone)]
pub struct CropController {
    config: TileConfig,
    natural: Size,
    container: Size,
    zoom: f64,
    transform: DisplayTransform,
    rect: CropRect,
    state: GestureState,
    last: Point,
}

impl CropController {
    pub fn new(config: &TileConfig) -> Self {
        Self {
            config: config.clone(),
            natural: Size::default(),
            container: Size::default(),
            zoom: 1.0,
            transform: DisplayTransform::default(),
            rect: CropRect::default(),
            state: GestureState::Idle,
            last: Point::default(),
        }
    }

    /// Start a crop session for an image of `natural` size shown in
    /// `container`. Replaces the rect and resets zoom and gesture state.
    ///
    /// Empty sizes leave the controller inert rather than failing.
    pub fn load(&mut self, natural: Size, container: Size) {
        self.natural = natural;
        self.container = container;
        self.zoom = 1.0;
        self.state = GestureState::Idle;
        self.transform = DisplayTransform::fit(natural, container);
        self.rect = initial_crop_rect(self.display_size(), self.config.initial_fill);

        log::debug!(
            "crop session {}x{} in {}x{} at scale {:.3}",
            natural.width,
            natural.height,
            container.width,
            container.height,
            self.transform.scale
        );
    }

    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        !self.transform.is_inert()
    }

    pub fn crop_rect(&self) -> CropRect {
        self.rect
    }

    pub fn display_transform(&self) -> DisplayTransform {
        self.transform
    }

    /// Size of the displayed image, the bounds the rect lives in.
    pub fn display_size(&self) -> Size {
        self.transform.display_size(self.natural)
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Start a drag or resize depending on what is under `pos`.
    ///
    /// Ignored while a gesture is already active. Returns the new state.
    pub fn pointer_down(&mut self, pos: Point) -> GestureState {
        if self.state.is_active() || !self.is_loaded() {
            return self.state;
        }

        let p = self.transform.container_to_display(pos);
        self.state = match hit_test(&self.rect, p, self.config.handle_tolerance) {
            Some(HitTarget::Handle(handle)) => GestureState::Resizing(handle),
            Some(HitTarget::Body) => GestureState::Dragging,
            None => GestureState::Idle,
        };
        self.last = p;
        self.state
    }

    /// Start a resize on a specific handle, for handles rendered as their own
    /// elements that receive the event directly.
    pub fn pointer_down_on_handle(&mut self, handle: Handle, pos: Point) -> GestureState {
        if self.state.is_active() || !self.is_loaded() {
            return self.state;
        }

        self.state = GestureState::Resizing(handle);
        self.last = self.transform.container_to_display(pos);
        self.state
    }

    /// Apply a move. Returns true when the rect changed.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if !self.state.is_active() {
            return false;
        }

        let p = self.transform.container_to_display(pos);
        let (dx, dy) = (p.x - self.last.x, p.y - self.last.y);
        self.last = p;

        let bounds = self.display_size();
        let next = match self.state {
            GestureState::Dragging => move_rect(&self.rect, dx, dy, bounds),
            GestureState::Resizing(handle) => {
                let at = handle.position(&self.rect);
                resize_rect(
                    &self.rect,
                    handle,
                    Point::new(at.x + dx, at.y + dy),
                    bounds,
                    self.config.min_crop_width,
                )
            }
            GestureState::Idle => return false,
        };

        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    pub fn pointer_up(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Touch start. Only single-finger gestures are recognised.
    pub fn touch_start(&mut self, touches: &[Point]) -> GestureState {
        match touches {
            [only] => self.pointer_down(*only),
            _ => self.state,
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        match touches {
            [only] => self.pointer_move(*only),
            _ => false,
        }
    }

    pub fn touch_end(&mut self) {
        self.pointer_up();
    }

    /// Set the zoom factor, clamped to the configured range.
    ///
    /// The rect is scaled with the image and re-clamped into the new display
    /// bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        let zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        if !self.is_loaded() {
            self.zoom = zoom;
            return;
        }

        let old_scale = self.transform.scale;
        self.zoom = zoom;
        self.transform = DisplayTransform::fit_zoomed(self.natural, self.container, zoom);
        self.rect = clamp_rect(
            &self.rect.scaled(self.transform.scale / old_scale),
            self.display_size(),
        );
    }

    /// The crop rect in natural image pixels, or `None` before a load.
    pub fn natural_crop_rect(&self) -> Option<PixelRect> {
        self.is_loaded()
            .then(|| self.transform.to_natural(&self.rect, self.natural))
    }

    /// Cut the current crop out of `image` at the target size.
    pub fn confirm(&self, image: &DecodedImage) -> Result<ConfirmedCrop, CropError> {
        let rect = self.natural_crop_rect().unwrap_or_default();
        confirm_crop(image, rect, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ASPECT_RATIO;

    const EPS: f64 = 1e-9;

    /// 2000x1000 in 1000x800: scale 0.5, display 1000x500 at (0, 150).
    fn loaded() -> CropController {
        let mut c = CropController::new(&TileConfig::default());
        c.load(Size::new(2000.0, 1000.0), Size::new(1000.0, 800.0));
        c
    }

    /// Convert a display-space point into container space.
    fn container(c: &CropController, p: Point) -> Point {
        let t = c.display_transform();
        Point::new(p.x + t.offset_x, p.y + t.offset_y)
    }

    #[test]
    fn test_load_centers_initial_rect() {
        let c = loaded();
        let rect = c.crop_rect();

        assert!((c.display_transform().scale - 0.5).abs() < EPS);
        assert!((rect.height - 400.0).abs() < EPS);
        assert!((rect.aspect_ratio() - ASPECT_RATIO).abs() < 1e-3);
        assert!((rect.center().x - 500.0).abs() < EPS);
        assert!((rect.center().y - 250.0).abs() < EPS);
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn test_unloaded_is_inert() {
        let mut c = CropController::new(&TileConfig::default());
        assert_eq!(c.pointer_down(Point::new(10.0, 10.0)), GestureState::Idle);
        assert!(!c.pointer_move(Point::new(20.0, 20.0)));
        assert_eq!(c.natural_crop_rect(), None);

        c.load(Size::new(0.0, 0.0), Size::new(800.0, 600.0));
        assert!(!c.is_loaded());
        assert_eq!(c.crop_rect(), CropRect::default());
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let mut c = loaded();
        let before = c.crop_rect();
        let start = container(&c, before.center());

        assert_eq!(c.pointer_down(start), GestureState::Dragging);
        assert!(c.pointer_move(Point::new(start.x + 30.0, start.y - 20.0)));
        assert!(c.pointer_move(Point::new(start.x + 50.0, start.y - 20.0)));

        let after = c.crop_rect();
        assert!((after.x - (before.x + 50.0)).abs() < EPS);
        assert!((after.y - (before.y - 20.0)).abs() < EPS);
        assert_eq!((after.width, after.height), (before.width, before.height));
    }

    #[test]
    fn test_drag_clamps_to_display() {
        let mut c = loaded();
        let start = container(&c, c.crop_rect().center());

        c.pointer_down(start);
        c.pointer_move(Point::new(start.x + 5000.0, start.y + 5000.0));

        let rect = c.crop_rect();
        assert!((rect.right() - 1000.0).abs() < EPS);
        assert!((rect.bottom() - 500.0).abs() < EPS);
    }

    #[test]
    fn test_resize_corner_keeps_anchor() {
        let mut c = loaded();
        let before = c.crop_rect();
        let corner = container(&c, Handle::SouthEast.position(&before));

        assert_eq!(
            c.pointer_down(corner),
            GestureState::Resizing(Handle::SouthEast)
        );
        c.pointer_move(Point::new(corner.x - 100.0, corner.y));

        let after = c.crop_rect();
        assert_eq!((after.x, after.y), (before.x, before.y));
        assert!((after.width - (before.width - 100.0)).abs() < EPS);
        assert!((after.aspect_ratio() - ASPECT_RATIO).abs() < 1e-3);
    }

    #[test]
    fn test_resize_is_incremental() {
        let mut c = loaded();
        let before = c.crop_rect();
        let start = container(&c, Handle::East.position(&before));

        c.pointer_down_on_handle(Handle::East, start);
        for step in 1..=10 {
            c.pointer_move(Point::new(start.x - 10.0 * f64::from(step), start.y));
        }

        let after = c.crop_rect();
        assert!((after.width - (before.width - 100.0)).abs() < 1e-6);
        assert!((after.center().y - before.center().y).abs() < 1e-6);
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut c = loaded();
        let rect = c.crop_rect();

        c.pointer_down(container(&c, rect.center()));
        let corner = container(&c, Handle::NorthWest.position(&rect));
        assert_eq!(c.pointer_down(corner), GestureState::Dragging);

        c.pointer_leave();
        assert_eq!(c.state(), GestureState::Idle);
        assert_eq!(
            c.pointer_down(corner),
            GestureState::Resizing(Handle::NorthWest)
        );
        c.pointer_up();
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn test_pointer_down_outside_stays_idle() {
        let mut c = loaded();
        assert_eq!(c.pointer_down(Point::new(1.0, 1.0)), GestureState::Idle);
        assert!(!c.pointer_move(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_multi_touch_ignored() {
        let mut c = loaded();
        let center = container(&c, c.crop_rect().center());
        let other = Point::new(center.x + 40.0, center.y);

        assert_eq!(c.touch_start(&[center, other]), GestureState::Idle);

        assert_eq!(c.touch_start(&[center]), GestureState::Dragging);
        let before = c.crop_rect();
        assert!(!c.touch_move(&[other, center]));
        assert_eq!(c.crop_rect(), before);

        assert!(c.touch_move(&[other]));
        c.touch_end();
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn test_zoom_scales_rect() {
        let mut c = loaded();
        let before = c.crop_rect();
        let natural_before = c.natural_crop_rect();

        c.set_zoom(2.0);
        assert!((c.display_transform().scale - 1.0).abs() < EPS);
        let after = c.crop_rect();
        assert!((after.width - before.width * 2.0).abs() < 1e-6);
        assert!(after.is_within(c.display_size(), 1e-6));
        assert_eq!(c.natural_crop_rect(), natural_before);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut c = loaded();
        c.set_zoom(100.0);
        assert_eq!(c.zoom(), 4.0);
        assert!((c.display_transform().scale - 2.0).abs() < EPS);

        c.set_zoom(0.0);
        assert_eq!(c.zoom(), 0.1);
        let rect = c.crop_rect();
        assert!(rect.is_within(c.display_size(), 1e-6));
        assert!((rect.aspect_ratio() - ASPECT_RATIO).abs() < 1e-3);
    }

    #[test]
    fn test_natural_rect_inverts_scale() {
        let c = loaded();
        let rect = c.crop_rect();
        let natural = c.natural_crop_rect().unwrap();

        assert_eq!(natural.x, (rect.x * 2.0).round() as u32);
        assert_eq!(natural.height, 800);
    }

    #[test]
    fn test_confirm_produces_target_size() {
        let c = loaded();
        let image = DecodedImage::filled(2000, 1000, [10, 20, 30]);

        let confirmed = c.confirm(&image).unwrap();
        assert_eq!((confirmed.image.width, confirmed.image.height), (1214, 683));
        assert_eq!(&confirmed.png[1..4], b"PNG");
    }
}
