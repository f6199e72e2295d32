//! Equirectangular projection with zoom and pan

use egui::{Pos2, Rect, Vec2};
use geo_types::{coord, Rect as GeoRect};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 40.0;

/// Zoom and pan state of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub zoom: f64,
    /// Longitude and latitude shown at the center of the panel
    pub center: [f64; 2],
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            center: [0.0, 0.0],
        }
    }
}

impl GeoTransform {
    /// Projection fitted to a panel; at zoom 1 the whole world fits
    pub fn projection(&self, rect: Rect) -> Projection {
        let base = (rect.width() as f64 / 360.0).min(rect.height() as f64 / 180.0);
        Projection {
            rect,
            scale: base * self.zoom,
            center: self.center,
        }
    }

    /// Move the map by a screen-space drag
    pub fn pan(&mut self, delta: Vec2, rect: Rect) {
        let scale = self.projection(rect).scale;
        if scale <= 0.0 {
            return;
        }
        self.center[0] -= delta.x as f64 / scale;
        self.center[1] += delta.y as f64 / scale;
        self.clamp_center();
    }

    /// Zoom by a factor, keeping the point under `anchor` in place
    pub fn zoom_at(&mut self, factor: f64, anchor: Pos2, rect: Rect) {
        let before = self.projection(rect);
        let geo = before.to_geo(anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let after = self.projection(rect);
        if after.scale <= 0.0 {
            return;
        }
        let offset = anchor - rect.center();
        self.center = [
            geo[0] - offset.x as f64 / after.scale,
            geo[1] + offset.y as f64 / after.scale,
        ];
        self.clamp_center();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clamp_center(&mut self) {
        self.center[0] = self.center[0].clamp(-180.0, 180.0);
        self.center[1] = self.center[1].clamp(-90.0, 90.0);
    }
}

/// A transform resolved against one panel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub rect: Rect,
    /// Screen points per degree
    pub scale: f64,
    pub center: [f64; 2],
}

impl Projection {
    pub fn to_screen(&self, lon: f64, lat: f64) -> Pos2 {
        let c = self.rect.center();
        Pos2::new(
            c.x + ((lon - self.center[0]) * self.scale) as f32,
            c.y - ((lat - self.center[1]) * self.scale) as f32,
        )
    }

    /// Longitude and latitude under a screen position
    pub fn to_geo(&self, pos: Pos2) -> [f64; 2] {
        let c = self.rect.center();
        [
            self.center[0] + (pos.x - c.x) as f64 / self.scale,
            self.center[1] - (pos.y - c.y) as f64 / self.scale,
        ]
    }

    /// Geographic rectangle covered by the panel
    pub fn visible_bounds(&self) -> GeoRect<f64> {
        let [west, north] = self.to_geo(self.rect.left_top());
        let [east, south] = self.to_geo(self.rect.right_bottom());
        GeoRect::new(coord! { x: west, y: south }, coord! { x: east, y: north })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn panel() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(720.0, 400.0))
    }

    #[test]
    fn test_world_fits_at_zoom_one() {
        let projection = GeoTransform::default().projection(panel());
        assert_eq!(projection.scale, 2.0);
        assert_eq!(projection.to_screen(-180.0, 0.0), pos2(0.0, 200.0));
        assert_eq!(projection.to_screen(180.0, 90.0), pos2(720.0, 20.0));
    }

    #[test]
    fn test_screen_geo_round_trip() {
        let transform = GeoTransform {
            zoom: 3.5,
            center: [24.0, 61.0],
        };
        let projection = transform.projection(panel());
        let pos = projection.to_screen(26.5, 64.25);
        let [lon, lat] = projection.to_geo(pos);
        assert!((lon - 26.5).abs() < 1e-3);
        assert!((lat - 64.25).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut transform = GeoTransform::default();
        let anchor = pos2(500.0, 120.0);
        let before = transform.projection(panel()).to_geo(anchor);

        transform.zoom_at(2.0, anchor, panel());
        let after = transform.projection(panel()).to_geo(anchor);

        assert_eq!(transform.zoom, 2.0);
        assert!((before[0] - after[0]).abs() < 1e-6);
        assert!((before[1] - after[1]).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut transform = GeoTransform::default();
        transform.zoom_at(0.1, pos2(360.0, 200.0), panel());
        assert_eq!(transform.zoom, MIN_ZOOM);
        transform.zoom_at(1e6, pos2(360.0, 200.0), panel());
        assert_eq!(transform.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let mut transform = GeoTransform::default();
        transform.pan(vec2(20.0, -10.0), panel());
        assert_eq!(transform.center, [-10.0, -5.0]);
    }

    #[test]
    fn test_visible_bounds() {
        let bounds = GeoTransform::default().projection(panel()).visible_bounds();
        assert_eq!(bounds.min().x, -180.0);
        assert_eq!(bounds.max().x, 180.0);
        assert_eq!(bounds.max().y, 100.0);
    }
}
