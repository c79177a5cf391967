use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Build from two opposite corners in any order.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub const fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub const fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub const fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub const fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub const fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Arithmetic midpoint in degrees.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, LatLngBounds};

    #[test]
    fn new_orders_corners() {
        let bounds = LatLngBounds::new(LatLng::new(35.4, 139.5), LatLng::new(35.3, 139.3));
        assert_eq!(bounds.south_west, LatLng::new(35.3, 139.3));
        assert_eq!(bounds.north_east, LatLng::new(35.4, 139.5));
    }

    #[test]
    fn from_points_covers_every_point() {
        let points = [
            LatLng::new(35.33, 139.40),
            LatLng::new(35.31, 139.42),
            LatLng::new(35.35, 139.38),
        ];
        let bounds = LatLngBounds::from_points(points).expect("non-empty input");
        assert!(points.iter().all(|p| bounds.contains(*p)));
        assert_eq!(bounds.south(), 35.31);
        assert_eq!(bounds.north(), 35.35);
        assert_eq!(bounds.west(), 139.38);
        assert_eq!(bounds.east(), 139.42);
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(LatLngBounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn center_is_midpoint() {
        let bounds = LatLngBounds::new(LatLng::new(35.0, 139.0), LatLng::new(36.0, 140.0));
        assert_eq!(bounds.center(), LatLng::new(35.5, 139.5));
    }

    #[test]
    fn validity_rejects_out_of_range() {
        assert!(LatLng::new(35.3, 139.4).is_valid());
        assert!(!LatLng::new(91.0, 139.4).is_valid());
        assert!(!LatLng::new(35.3, 181.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
