//! Bindings to the page's global `L` (Leaflet plus leaflet-control-geocoder).

use js_sys::{Array, Function};
use shelter_shared::LatLng;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = L)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn map(container: &HtmlElement, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &Map) -> Map;

    #[wasm_bindgen(method, js_name = getSize)]
    pub fn get_size(this: &Map) -> Point;

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = L)]
    pub type Point;

    #[wasm_bindgen(method, getter)]
    pub fn x(this: &Point) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn y(this: &Point) -> f64;

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = L)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = ["L", "Control"])]
    pub type Zoom;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = zoom)]
    pub fn zoom_control(options: &JsValue) -> Zoom;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Zoom, map: &Map) -> Zoom;

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = L)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(at: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, html: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Marker) -> Marker;

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = ["L", "Control", "Geocoder"])]
    pub type Geocoder;

    #[wasm_bindgen(js_namespace = ["L", "Control", "Geocoder"], js_name = nominatim)]
    pub fn nominatim(options: &JsValue) -> Geocoder;

    /// Calls back once with an array of `{ name, center, bbox }` results.
    #[wasm_bindgen(method)]
    pub fn geocode(this: &Geocoder, query: &str, callback: &Function);
}

/// `[lat, lng]`, which Leaflet accepts anywhere a `LatLng` is expected.
pub fn lat_lng(point: LatLng) -> JsValue {
    Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lng)).into()
}

