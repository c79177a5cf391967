use std::fmt;

use shelter_shared::{
    DatasetError, LatLngBounds, SearchError, Shelter, ShelterId, parse_dataset, popup_html,
    search_database, validate_query,
};

use crate::config::{MIN_ZOOM, MapConfig};
use crate::panel::PanelState;
use crate::registry::{MarkerRegistry, PlacedMarker};
use crate::surface::{ListEntry, MapSurface};
use crate::viewport::MapView;

/// What a search did to the map.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Exactly one shelter matched and was focused.
    Focused(ShelterId),
    /// Several shelters matched; the map was framed around all of them.
    Framed { matches: Vec<ShelterId>, view: MapView },
    /// Nothing local matched; the query went to the geocoder.
    Geocoded(String),
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focused(id) => write!(f, "focused shelter {id}"),
            Self::Framed { matches, view } => write!(
                f,
                "framed {} shelters at zoom {} around ({:.5}, {:.5})",
                matches.len(),
                view.zoom,
                view.center.lat,
                view.center.lng
            ),
            Self::Geocoded(query) => write!(f, "no local match; geocoding \"{query}\""),
        }
    }
}

/// Owns the loaded shelters, their markers and the panel state, and drives
/// a [`MapSurface`] in response to list clicks, searches and toggles.
pub struct MapViewController<S: MapSurface> {
    surface: S,
    config: MapConfig,
    shelters: Vec<Shelter>,
    markers: MarkerRegistry<S::Marker>,
    panel: PanelState,
}

impl<S: MapSurface> MapViewController<S> {
    pub fn new(mut surface: S, config: MapConfig) -> Self {
        let panel = PanelState::default();
        surface.render_map(&config);
        surface.show_panel(panel);
        Self {
            surface,
            config,
            shelters: Vec::new(),
            markers: MarkerRegistry::new(),
            panel,
        }
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    #[cfg(test)]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn panel_state(&self) -> PanelState {
        self.panel
    }

    /// Parse a raw dataset payload and show it. Returns the number of
    /// markers placed.
    pub fn load_payload(&mut self, raw: &str) -> Result<usize, DatasetError> {
        let dataset = match parse_dataset(raw) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.surface.error(&format!("Shelter data unusable: {e}"));
                return Err(e);
            }
        };
        for rejected in &dataset.rejected {
            self.surface.warn(&format!(
                "Skipping shelter record #{}: {}",
                rejected.index, rejected.reason
            ));
        }
        Ok(self.load_shelters(dataset.shelters))
    }

    /// Replace all markers and list rows with `shelters`. A record whose id
    /// was already seen is skipped.
    pub fn load_shelters(&mut self, shelters: Vec<Shelter>) -> usize {
        self.clear_markers();

        let mut kept = Vec::with_capacity(shelters.len());
        for shelter in shelters {
            if self.markers.contains(&shelter.id) {
                self.surface.warn(&format!(
                    "Duplicate shelter id {}; keeping the first record",
                    shelter.id
                ));
                continue;
            }
            let position = shelter.position();
            let marker = self.surface.place_marker(position, &popup_html(&shelter));
            if let Err(placed) = self
                .markers
                .insert(shelter.id.clone(), PlacedMarker { marker, position })
            {
                self.surface.remove_marker(&placed.marker);
                continue;
            }
            kept.push(shelter);
        }

        self.surface
            .render_list(kept.iter().map(ListEntry::from_shelter).collect());
        self.shelters = kept;
        self.markers.len()
    }

    /// Center on one shelter at the focus zoom and open its popup.
    pub fn focus_shelter(&mut self, id: &ShelterId) -> bool {
        let Some(placed) = self.markers.get(id) else {
            self.surface.warn(&format!("No marker for shelter {id}"));
            return false;
        };
        self.surface
            .set_view(MapView::new(placed.position, self.config.focus_zoom));
        self.surface.open_popup(&placed.marker);
        true
    }

    pub fn toggle_panel(&mut self) -> PanelState {
        self.panel = self.panel.toggled();
        self.surface.show_panel(self.panel);
        self.panel
    }

    pub fn search_database(&self, query: &str) -> Vec<&Shelter> {
        search_database(&self.shelters, query)
    }

    /// Run a search from the raw input value. Invalid input is logged and
    /// leaves the map untouched.
    pub fn perform_search(&mut self, raw: Option<&str>) -> Result<SearchOutcome, SearchError> {
        let query = match validate_query(raw) {
            Ok(query) => query,
            Err(e) => {
                self.surface.error(&format!("Search aborted: {e}"));
                return Err(e);
            }
        };

        let matches: Vec<ShelterId> = self
            .search_database(query)
            .into_iter()
            .map(|shelter| shelter.id.clone())
            .collect();

        match matches.as_slice() {
            [] => {
                self.surface.geocode(query, &self.config.geocoder_bounds);
                Ok(SearchOutcome::Geocoded(query.to_string()))
            }
            [only] => {
                let only = only.clone();
                self.focus_shelter(&only);
                Ok(SearchOutcome::Focused(only))
            }
            _ => {
                let view = self.frame(&matches);
                Ok(SearchOutcome::Framed { matches, view })
            }
        }
    }

    /// Fit the map around the given shelters, never closer than the focus zoom.
    fn frame(&mut self, ids: &[ShelterId]) -> MapView {
        let bounds = LatLngBounds::from_points(
            ids.iter()
                .filter_map(|id| self.markers.get(id))
                .map(|placed| placed.position),
        );
        let (width, height) = self.surface.viewport_size();
        let view = bounds
            .and_then(|bounds| {
                MapView::fit_bounds(
                    &bounds,
                    width,
                    height,
                    self.config.fit_padding,
                    MIN_ZOOM,
                    self.config.focus_zoom,
                )
            })
            .unwrap_or_else(|| {
                let center = bounds.map_or(self.config.center, |b| b.center());
                MapView::new(center, self.config.zoom)
            });
        self.surface.set_view(view);
        view
    }

    fn clear_markers(&mut self) {
        for placed in self.markers.drain() {
            self.surface.remove_marker(&placed.marker);
        }
    }
}

impl<S: MapSurface> Drop for MapViewController<S> {
    fn drop(&mut self) {
        self.clear_markers();
    }
}
