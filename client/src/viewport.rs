use std::f64::consts::PI;

use shelter_shared::{LatLng, LatLngBounds};

/// Edge length of one slippy-map tile in CSS pixels.
pub const TILE_SIZE: f64 = 256.0;
/// Web Mercator cuts off at this latitude.
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Map center and zoom, the pair every pan or zoom request carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapView {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Largest integer zoom at which `bounds` fits a `width`x`height` viewport
    /// with `padding` pixels kept free on every side, centered on the bounds.
    /// Returns `None` when the viewport leaves no room after padding.
    pub fn fit_bounds(
        bounds: &LatLngBounds,
        width: f64,
        height: f64,
        padding: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Option<Self> {
        let avail_w = width - padding * 2.0;
        let avail_h = height - padding * 2.0;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return None;
        }

        let (west, north) = project(LatLng::new(bounds.north(), bounds.west()));
        let (east, south) = project(LatLng::new(bounds.south(), bounds.east()));
        let world_w = east - west;
        let world_h = south - north;

        let zoom_x = zoom_to_fit(world_w, avail_w);
        let zoom_y = zoom_to_fit(world_h, avail_h);
        let zoom = zoom_x.min(zoom_y);
        let zoom = if zoom.is_finite() { zoom.floor() } else { max_zoom };

        let center = unproject((west + east) / 2.0, (north + south) / 2.0);
        Some(Self::new(center, zoom.max(min_zoom).min(max_zoom)))
    }
}

fn zoom_to_fit(world_span: f64, pixels: f64) -> f64 {
    if world_span <= 0.0 {
        return f64::INFINITY;
    }
    (pixels / (world_span * TILE_SIZE)).log2()
}

/// Spherical Mercator into the unit square, `y` growing southward.
pub fn project(point: LatLng) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

pub fn unproject(x: f64, y: f64) -> LatLng {
    let n = PI * (1.0 - 2.0 * y);
    LatLng::new(n.sinh().atan().to_degrees(), x * 360.0 - 180.0)
}
