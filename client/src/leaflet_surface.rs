use js_sys::Reflect;
use leptos::prelude::*;
use serde::Serialize;
use shelter_shared::{LatLng, LatLngBounds};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::config::MapConfig;
use crate::leaflet::{self, lat_lng};
use crate::panel::PanelState;
use crate::surface::{ListEntry, MapSurface};
use crate::viewport::MapView;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    max_zoom: f64,
    zoom_control: bool,
}

/// The list panel covers the top-left corner.
#[derive(Serialize)]
struct ZoomControlOptions {
    position: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    attribution: &'a str,
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeocoderOptions {
    geocoding_query_params: GeocodingQueryParams,
}

/// Nominatim query parameters restricting results to a box.
#[derive(Serialize)]
struct GeocodingQueryParams {
    viewbox: String,
    bounded: u8,
}

/// Nominatim `viewbox`: `west,north,east,south` in degrees.
fn nominatim_viewbox(bounds: &LatLngBounds) -> String {
    format!(
        "{},{},{},{}",
        bounds.west(),
        bounds.north(),
        bounds.east(),
        bounds.south()
    )
}

fn to_js<T: Serialize>(options: &T) -> JsValue {
    serde_wasm_bindgen::to_value(options).unwrap_or(JsValue::UNDEFINED)
}

/// [`MapSurface`] backed by Leaflet in the `map` container. The list and
/// panel are rendered by Leptos components watching the two signals.
pub struct LeafletSurface {
    container: HtmlElement,
    map: Option<leaflet::Map>,
    focus_zoom: f64,
    list: RwSignal<Vec<ListEntry>>,
    panel: RwSignal<PanelState>,
}

impl LeafletSurface {
    pub fn new(
        container: HtmlElement,
        list: RwSignal<Vec<ListEntry>>,
        panel: RwSignal<PanelState>,
    ) -> Self {
        Self {
            container,
            map: None,
            focus_zoom: crate::config::DEFAULT_FOCUS_ZOOM,
            list,
            panel,
        }
    }
}

impl MapSurface for LeafletSurface {
    type Marker = leaflet::Marker;

    fn render_map(&mut self, config: &MapConfig) {
        let map = leaflet::map(
            &self.container,
            &to_js(&MapOptions {
                max_zoom: config.max_zoom,
                zoom_control: false,
            }),
        );
        leaflet::zoom_control(&to_js(&ZoomControlOptions {
            position: "topright",
        }))
        .add_to(&map);
        map.set_view(&lat_lng(config.center), config.zoom);
        leaflet::tile_layer(
            &config.tile_url,
            &to_js(&TileLayerOptions {
                attribution: &config.attribution,
                max_zoom: config.max_zoom,
            }),
        )
        .add_to(&map);
        self.focus_zoom = config.focus_zoom;
        self.map = Some(map);
    }

    fn place_marker(&mut self, at: LatLng, popup_html: &str) -> leaflet::Marker {
        let marker = leaflet::marker(&lat_lng(at));
        marker.bind_popup(popup_html);
        if let Some(map) = &self.map {
            marker.add_to(map);
        }
        marker
    }

    fn remove_marker(&mut self, marker: &leaflet::Marker) {
        marker.remove();
    }

    fn open_popup(&mut self, marker: &leaflet::Marker) {
        marker.open_popup();
    }

    fn set_view(&mut self, view: MapView) {
        if let Some(map) = &self.map {
            map.set_view(&lat_lng(view.center), view.zoom);
        }
    }

    fn viewport_size(&self) -> (f64, f64) {
        match &self.map {
            Some(map) => {
                let size = map.get_size();
                (size.x(), size.y())
            }
            None => (0.0, 0.0),
        }
    }

    fn render_list(&mut self, entries: Vec<ListEntry>) {
        self.list.set(entries);
    }

    fn show_panel(&mut self, state: PanelState) {
        self.panel.set(state);
        if let Some(map) = &self.map {
            map.invalidate_size();
        }
    }

    fn geocode(&mut self, query: &str, bounds: &LatLngBounds) {
        let Some(map) = self.map.clone() else {
            self.warn("Geocoder called before the map was rendered");
            return;
        };
        let geocoder = leaflet::Geocoder::nominatim(&to_js(&GeocoderOptions {
            geocoding_query_params: GeocodingQueryParams {
                viewbox: nominatim_viewbox(bounds),
                bounded: 1,
            },
        }));
        let focus_zoom = self.focus_zoom;
        let label = query.to_string();
        let callback = Closure::once_into_js(move |results: JsValue| {
            show_first_result(&map, &results, focus_zoom, &label);
        });
        geocoder.geocode(query, callback.unchecked_ref());
    }

    fn warn(&self, message: &str) {
        web_sys::console::warn_1(&message.into());
    }

    fn error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
    }
}

/// Frame the first geocoder hit: its bounding box when it has one,
/// otherwise its center at the focus zoom.
fn show_first_result(map: &leaflet::Map, results: &JsValue, focus_zoom: f64, query: &str) {
    let first = js_sys::Array::from(results).get(0);
    if first.is_undefined() {
        web_sys::console::warn_1(&format!("No geocoder result for \"{query}\"").into());
        return;
    }
    if let Ok(bbox) = Reflect::get(&first, &JsValue::from_str("bbox"))
        && !bbox.is_undefined()
    {
        map.fit_bounds(&bbox);
        return;
    }
    if let Ok(center) = Reflect::get(&first, &JsValue::from_str("center"))
        && !center.is_undefined()
    {
        map.set_view(&center, focus_zoom);
    }
}
