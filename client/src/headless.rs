//! Recording [`MapSurface`] for driving the controller without a browser.

use std::cell::RefCell;
use std::rc::Rc;

use shelter_shared::{LatLng, LatLngBounds};

use crate::config::MapConfig;
use crate::panel::PanelState;
use crate::surface::{ListEntry, MapSurface};
use crate::viewport::MapView;

#[derive(Debug, Clone)]
pub struct HeadlessMarker {
    pub position: LatLng,
    pub popup_html: String,
    pub removed: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessState {
    pub rendered: Option<MapConfig>,
    pub view: Option<MapView>,
    pub markers: Vec<HeadlessMarker>,
    pub open_popup: Option<usize>,
    pub list: Vec<ListEntry>,
    pub panel: Option<PanelState>,
    pub geocode_calls: Vec<(String, LatLngBounds)>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl HeadlessState {
    pub fn live_markers(&self) -> usize {
        self.markers.iter().filter(|m| !m.removed).count()
    }

    pub fn open_popup_html(&self) -> Option<&str> {
        self.open_popup
            .and_then(|index| self.markers.get(index))
            .map(|marker| marker.popup_html.as_str())
    }
}

/// State lives behind a shared handle so tests can inspect it after the
/// controller owning the surface is gone.
pub struct HeadlessSurface {
    state: Rc<RefCell<HeadlessState>>,
    size: (f64, f64),
}

impl HeadlessSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: Rc::default(),
            size: (width, height),
        }
    }

    pub fn state(&self) -> Rc<RefCell<HeadlessState>> {
        Rc::clone(&self.state)
    }
}

impl MapSurface for HeadlessSurface {
    type Marker = usize;

    fn render_map(&mut self, config: &MapConfig) {
        let mut state = self.state.borrow_mut();
        state.rendered = Some(config.clone());
        state.view = Some(MapView::new(config.center, config.zoom));
    }

    fn place_marker(&mut self, at: LatLng, popup_html: &str) -> usize {
        let mut state = self.state.borrow_mut();
        state.markers.push(HeadlessMarker {
            position: at,
            popup_html: popup_html.to_string(),
            removed: false,
        });
        state.markers.len() - 1
    }

    fn remove_marker(&mut self, marker: &usize) {
        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.markers.get_mut(*marker) {
            entry.removed = true;
        }
        if state.open_popup == Some(*marker) {
            state.open_popup = None;
        }
    }

    fn open_popup(&mut self, marker: &usize) {
        self.state.borrow_mut().open_popup = Some(*marker);
    }

    fn set_view(&mut self, view: MapView) {
        self.state.borrow_mut().view = Some(view);
    }

    fn viewport_size(&self) -> (f64, f64) {
        self.size
    }

    fn render_list(&mut self, entries: Vec<ListEntry>) {
        self.state.borrow_mut().list = entries;
    }

    fn show_panel(&mut self, state: PanelState) {
        self.state.borrow_mut().panel = Some(state);
    }

    fn geocode(&mut self, query: &str, bounds: &LatLngBounds) {
        self.state
            .borrow_mut()
            .geocode_calls
            .push((query.to_string(), *bounds));
    }

    fn warn(&self, message: &str) {
        self.state.borrow_mut().warnings.push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.state.borrow_mut().errors.push(message.to_string());
    }
}
