use serde::{Deserialize, Serialize};
use shelter_shared::{LatLng, LatLngBounds};

use crate::dom;

/// Optional `<script type="application/json">` element overriding defaults.
pub const CONFIG_ELEMENT_ID: &str = "mapConfig";

pub const DEFAULT_CENTER: LatLng = LatLng::new(35.33384389, 139.40362191); // Chigasaki city
pub const DEFAULT_ZOOM: f64 = 13.0;
/// Close-up zoom used when focusing a single shelter.
pub const DEFAULT_FOCUS_ZOOM: f64 = 16.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 19.0;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_FIT_PADDING_PX: f64 = 40.0;

// Geocoder search box around the city.
pub const GEOCODER_SOUTH_WEST: LatLng = LatLng::new(35.29, 139.36);
pub const GEOCODER_NORTH_EAST: LatLng = LatLng::new(35.37, 139.45);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub focus_zoom: f64,
    pub max_zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    pub geocoder_bounds: LatLngBounds,
    /// Pixels kept free around framed search results.
    pub fit_padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            geocoder_bounds: LatLngBounds::new(GEOCODER_SOUTH_WEST, GEOCODER_NORTH_EAST),
            fit_padding: DEFAULT_FIT_PADDING_PX,
        }
    }
}

impl MapConfig {
    /// Read the page override, falling back to defaults.
    pub fn from_page() -> Self {
        let Some(raw) = dom::element_text(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::warn_1(&format!("Ignoring map config: {e}").into());
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(config.normalized())
    }

    /// Keep zoom levels ordered: `MIN_ZOOM <= zoom, focus_zoom <= max_zoom`.
    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if !self.max_zoom.is_finite() || self.max_zoom < MIN_ZOOM {
            self.max_zoom = defaults.max_zoom;
        }
        if !self.zoom.is_finite() {
            self.zoom = defaults.zoom;
        }
        if !self.focus_zoom.is_finite() {
            self.focus_zoom = defaults.focus_zoom;
        }
        self.zoom = self.zoom.max(MIN_ZOOM).min(self.max_zoom);
        self.focus_zoom = self.focus_zoom.max(MIN_ZOOM).min(self.max_zoom);
        if !self.center.is_valid() {
            self.center = defaults.center;
        }
        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            self.fit_padding = defaults.fit_padding;
        }
        self
    }
}
