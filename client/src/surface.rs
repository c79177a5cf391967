use shelter_shared::{LatLng, LatLngBounds, Shelter, ShelterId, capacity_label};

use crate::config::MapConfig;
use crate::panel::PanelState;
use crate::viewport::MapView;

/// One row of the shelter list panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: ShelterId,
    pub name: String,
    pub address: String,
    pub capacity: String,
    pub kind: Option<String>,
}

impl ListEntry {
    pub fn from_shelter(shelter: &Shelter) -> Self {
        Self {
            id: shelter.id.clone(),
            name: shelter.name.clone(),
            address: shelter.address.clone(),
            capacity: capacity_label(shelter.capacity),
            kind: shelter.other.clone(),
        }
    }
}

/// Page-side operations the map controller drives: the slippy map, its
/// markers, the list panel, the geocoder and the console.
pub trait MapSurface {
    /// Handle to a marker placed on the map.
    type Marker;

    fn render_map(&mut self, config: &MapConfig);
    fn place_marker(&mut self, at: LatLng, popup_html: &str) -> Self::Marker;
    fn remove_marker(&mut self, marker: &Self::Marker);
    fn open_popup(&mut self, marker: &Self::Marker);
    fn set_view(&mut self, view: MapView);
    /// Map container size in CSS pixels.
    fn viewport_size(&self) -> (f64, f64);
    fn render_list(&mut self, entries: Vec<ListEntry>);
    fn show_panel(&mut self, state: PanelState);
    /// Look up `query` with the external geocoder inside `bounds` and move
    /// the map to the first hit. Results arrive asynchronously.
    fn geocode(&mut self, query: &str, bounds: &LatLngBounds);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}
