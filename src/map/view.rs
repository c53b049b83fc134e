use crate::geo::LonLat;
use crate::util::f64_to_f32;
use egui::{Rect, Vec2};
use walkers::sources::Attribution;
use walkers::{HttpTiles, MapMemory, Position, Projector, Tiles, mercator};

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 20.0;
/// Latitude where the square Web Mercator world ends.
pub const MAX_LATITUDE: f64 = 85.051_128_78;
const FLY_RESPONSE_SECS: f32 = 0.35;
const FLY_ZOOM_EPS: f64 = 0.001;
const FLY_CENTER_EPS_DEG: f64 = 1e-7;
/// Deepest zoom used when fitting a tiny or single-point extent.
const FIT_MAX_ZOOM: f64 = 17.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FlyTarget {
    center: LonLat,
    zoom: f64,
}

/// Camera and basemap of the map widget.
///
/// Pan and gesture zoom are handled by the `walkers` widget on the shared [`MapMemory`];
/// this type adds animated fly-to and fitting on top.
pub struct MapView {
    memory: MapMemory,
    /// Fallback center the widget follows if the memory is not detached.
    anchor: Position,
    tiles: Option<HttpTiles>,
    fly: Option<FlyTarget>,
    smooth: bool,
}

impl MapView {
    pub fn new(center: LonLat, zoom: f64, smooth: bool) -> Self {
        let center = normalize(center);
        let mut view = Self {
            memory: MapMemory::default(),
            anchor: center.into(),
            tiles: None,
            fly: None,
            smooth,
        };
        view.apply(center, zoom);
        view
    }

    pub fn center(&self) -> LonLat {
        normalize(self.memory.detached().unwrap_or(self.anchor).into())
    }

    pub fn zoom(&self) -> f64 {
        self.memory.zoom()
    }

    pub const fn is_flying(&self) -> bool {
        self.fly.is_some()
    }

    pub const fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    pub fn set_tiles(&mut self, tiles: HttpTiles) {
        self.tiles = Some(tiles);
    }

    pub fn attribution(&self) -> Option<Attribution> {
        self.tiles.as_ref().map(Tiles::attribution)
    }

    /// What the `walkers::Map` widget borrows for one frame.
    pub fn widget_parts(&mut self) -> (Option<&mut dyn Tiles>, &mut MapMemory, Position) {
        let tiles = self.tiles.as_mut().map(|t| t as &mut dyn Tiles);
        (tiles, &mut self.memory, self.anchor)
    }

    pub fn projector(&self, viewport: Rect) -> Projector {
        Projector::new(viewport, &self.memory, self.anchor)
    }

    /// Reconcile with gestures the widget applied this frame. The user wins over a flight.
    pub fn after_gestures(&mut self, interacted: bool) {
        if interacted && self.fly.take().is_some() {
            log::debug!("fly-to interrupted by map gesture");
        }
        if self.zoom() > MAX_ZOOM {
            self.apply(self.center(), MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        let target = self.target_zoom() + 1.0;
        self.fly_to(self.target_center(), target);
    }

    pub fn zoom_out(&mut self) {
        let target = self.target_zoom() - 1.0;
        self.fly_to(self.target_center(), target);
    }

    fn target_zoom(&self) -> f64 {
        self.fly.map_or_else(|| self.zoom(), |f| f.zoom)
    }

    fn target_center(&self) -> LonLat {
        self.fly.map_or_else(|| self.center(), |f| f.center)
    }

    /// Move to `center` at `zoom`, animated when smoothing is enabled.
    pub fn fly_to(&mut self, center: LonLat, zoom: f64) {
        let target = FlyTarget {
            center: LonLat::new(center.lon, center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        };
        if self.smooth {
            self.fly = Some(target);
        } else {
            self.fly = None;
            self.apply(target.center, target.zoom);
        }
    }

    /// Fly to the smallest view that shows every point with `padding` pixels to spare.
    pub fn fit_bounds(&mut self, points: &[LonLat], viewport: Vec2, padding: f32) {
        let Some(first) = points.first() else {
            return;
        };
        let world = |p: &LonLat| mercator::project((*p).into(), 0.0);
        let start = world(first);
        let (mut min, mut max) = ([start.x(), start.y()], [start.x(), start.y()]);
        for p in &points[1..] {
            let w = world(p);
            min = [min[0].min(w.x()), min[1].min(w.y())];
            max = [max[0].max(w.x()), max[1].max(w.y())];
        }
        let span_x = max[0] - min[0];
        let span_y = max[1] - min[1];
        let avail_x = f64::from((viewport.x - 2.0 * padding).max(1.0));
        let avail_y = f64::from((viewport.y - 2.0 * padding).max(1.0));
        let fit_scale = match (span_x > f64::EPSILON, span_y > f64::EPSILON) {
            (true, true) => (avail_x / span_x).min(avail_y / span_y),
            (true, false) => avail_x / span_x,
            (false, true) => avail_y / span_y,
            (false, false) => FIT_MAX_ZOOM.exp2(),
        };
        let zoom = fit_scale.log2().clamp(MIN_ZOOM, FIT_MAX_ZOOM);

        // Unproject the box middle from a camera parked on the first point.
        let mut memory = MapMemory::default();
        memory.center_at((*first).into());
        if memory.set_zoom(zoom).is_err() {
            return;
        }
        let projector = Projector::new(Rect::ZERO, &memory, (*first).into());
        let scale = zoom.exp2();
        let offset = egui::vec2(
            f64_to_f32(((min[0] + max[0]) / 2.0 - start.x()) * scale),
            f64_to_f32(((min[1] + max[1]) / 2.0 - start.y()) * scale),
        );
        self.fly_to(projector.unproject(offset).into(), zoom);
    }

    /// Advance an active fly-to by `dt` seconds. Returns true while still moving.
    pub fn step_animation(&mut self, dt: f32) -> bool {
        let Some(target) = self.fly else {
            return false;
        };
        let (center, zoom) = (self.center(), self.zoom());
        let zoom_done = (target.zoom - zoom).abs() <= FLY_ZOOM_EPS;
        let center_done = (target.center.lon - center.lon).abs() <= FLY_CENTER_EPS_DEG
            && (target.center.lat - center.lat).abs() <= FLY_CENTER_EPS_DEG;
        if zoom_done && center_done {
            self.fly = None;
            self.apply(target.center, target.zoom);
            return false;
        }
        let alpha = f64::from(egui::emath::exponential_smooth_factor(
            0.90,
            FLY_RESPONSE_SECS,
            dt.clamp(0.0, 0.1),
        ));
        self.apply(
            LonLat::new(
                (target.center.lon - center.lon).mul_add(alpha, center.lon),
                (target.center.lat - center.lat).mul_add(alpha, center.lat),
            ),
            (target.zoom - zoom).mul_add(alpha, zoom),
        );
        true
    }

    fn apply(&mut self, center: LonLat, zoom: f64) {
        self.memory.center_at(normalize(center).into());
        if let Err(err) = self.memory.set_zoom(zoom.clamp(MIN_ZOOM, MAX_ZOOM)) {
            log::debug!("zoom {zoom} rejected: {err}");
        }
    }
}

/// Ground distance covered by one screen pixel at `at`.
pub fn meters_per_pixel(projector: &Projector, at: LonLat) -> f64 {
    1.0 / f64::from(projector.scale_pixel_per_meter(at.into()))
}

/// Wrap longitude into [-180, 180) and keep latitude inside the Mercator square.
fn normalize(point: LonLat) -> LonLat {
    let lon = if point.lon.is_finite() {
        (point.lon + 180.0).rem_euclid(360.0) - 180.0
    } else {
        0.0
    };
    let lat = if point.lat.is_finite() {
        point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    } else {
        0.0
    };
    LonLat::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn center_projects_to_viewport_center() {
        let view = MapView::new(LonLat::new(-100.43, 35.0), 5.0, false);
        let projector = view.projector(viewport());
        let screen = projector.project(LonLat::new(-100.43, 35.0).into()).to_pos2();
        assert!((screen - viewport().center()).length() < 1e-2);
        let back = LonLat::from(projector.unproject(viewport().center().to_vec2()));
        assert!((back.lon + 100.43).abs() < 1e-6);
        assert!((back.lat - 35.0).abs() < 1e-6);
    }

    #[test]
    fn center_longitude_wraps_and_latitude_clamps() {
        let view = MapView::new(LonLat::new(190.0, 89.0), 2.0, false);
        assert!((view.center().lon + 170.0).abs() < 1e-9);
        assert!((view.center().lat - MAX_LATITUDE).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 25.0, false);
        assert!((view.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        view.fly_to(LonLat::new(0.0, 0.0), -3.0);
        assert!((view.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn instant_fly_to_jumps() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 3.0, false);
        view.fly_to(LonLat::new(-97.5, 35.4), 15.0);
        assert!(!view.is_flying());
        assert!((view.center().lon + 97.5).abs() < 1e-9);
        assert!((view.zoom() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn smooth_fly_to_converges() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 3.0, true);
        view.fly_to(LonLat::new(-97.5, 35.4), 15.0);
        assert!(view.is_flying());
        let mut frames = 0;
        while view.step_animation(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 10_000, "fly-to never settled");
        }
        assert!(!view.is_flying());
        assert!((view.center().lon + 97.5).abs() < 1e-9);
        assert!((view.center().lat - 35.4).abs() < 1e-9);
        assert!((view.zoom() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_steps_accumulate_while_flying() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 3.0, true);
        view.zoom_in();
        view.zoom_in();
        while view.step_animation(1.0 / 30.0) {}
        assert!((view.zoom() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn gestures_cancel_a_flight() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 3.0, true);
        view.fly_to(LonLat::new(20.0, 10.0), 9.0);
        view.step_animation(1.0 / 60.0);
        view.after_gestures(false);
        assert!(view.is_flying());
        view.after_gestures(true);
        assert!(!view.is_flying());
        assert!(!view.step_animation(1.0 / 60.0));
    }

    #[test]
    fn fit_bounds_shows_every_point() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 2.0, false);
        let points = [
            LonLat::new(-100.0, 35.0),
            LonLat::new(-98.0, 36.5),
            LonLat::new(-99.0, 34.2),
        ];
        view.fit_bounds(&points, viewport().size(), 40.0);
        assert!(view.zoom() > 5.0);
        let projector = view.projector(viewport());
        let inner = viewport().shrink(39.0);
        for p in points {
            let screen = projector.project(p.into()).to_pos2();
            assert!(inner.contains(screen), "{p:?} at {screen:?}");
        }
    }

    #[test]
    fn fit_bounds_on_single_point_uses_deep_zoom() {
        let mut view = MapView::new(LonLat::new(0.0, 0.0), 2.0, false);
        view.fit_bounds(&[LonLat::new(2.35, 48.85)], viewport().size(), 40.0);
        assert!((view.zoom() - FIT_MAX_ZOOM).abs() < f64::EPSILON);
        assert!((view.center().lon - 2.35).abs() < 1e-6);
        assert!((view.center().lat - 48.85).abs() < 1e-6);
        view.fit_bounds(&[], viewport().size(), 40.0);
        assert!((view.zoom() - FIT_MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn scale_shrinks_with_zoom() {
        let scale_at = |zoom| {
            let view = MapView::new(LonLat::new(0.0, 0.0), zoom, false);
            meters_per_pixel(&view.projector(viewport()), view.center())
        };
        let (near, far) = (scale_at(10.0), scale_at(9.0));
        assert!((far / near - 2.0).abs() < 1e-4);
        // About 153 m per pixel at zoom 10 on the equator.
        assert!((near - 152.87).abs() < 0.5);
    }

    #[test]
    fn no_basemap_until_tiles_are_attached() {
        let view = MapView::new(LonLat::new(0.0, 0.0), 3.0, false);
        assert!(view.attribution().is_none());
    }
}
