use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::config::MapConfig;
use crate::controller::MapViewController;
use crate::dataset;
use crate::leaflet_surface::LeafletSurface;
use crate::panel::PanelState;
use crate::sidebar::ShelterPanel;
use crate::surface::{ListEntry, MapSurface};

/// Rows shown in the shelter list, written by the map surface.
#[derive(Clone, Copy)]
pub(crate) struct ShelterRows(pub RwSignal<Vec<ListEntry>>);
#[derive(Clone, Copy)]
pub(crate) struct PanelOpen(pub RwSignal<PanelState>);

/// Slot for the map controller. Empty until the map container mounts.
pub(crate) struct Controller<S: MapSurface + 'static = LeafletSurface>(
    pub StoredValue<Option<MapViewController<S>>, LocalStorage>,
);

impl<S: MapSurface + 'static> Clone for Controller<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: MapSurface + 'static> Copy for Controller<S> {}

impl<S: MapSurface + 'static> Controller<S> {
    /// Run `f` against the live controller; a no-op before the map exists.
    pub(crate) fn with_mut(self, f: impl FnOnce(&mut MapViewController<S>)) {
        self.0.update_value(|slot| {
            if let Some(controller) = slot.as_mut() {
                f(controller);
            }
        });
    }

    fn is_mounted(self) -> bool {
        self.0.with_value(Option::is_some)
    }
}

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

fn load_payload(controller: Controller, payload: &str) {
    controller.with_mut(|c| {
        if let Ok(count) = c.load_payload(payload) {
            web_sys::console::info_1(&format!("Placed {count} shelters").into());
        }
    });
}

/// Embedded payload first, `/api/shelters` otherwise.
fn load_shelters(controller: Controller) {
    if let Some(payload) = dataset::embedded_payload() {
        load_payload(controller, &payload);
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        match dataset::fetch_payload().await {
            Ok(payload) => load_payload(controller, &payload),
            Err(e) => {
                web_sys::console::warn_1(&format!("Shelter fetch failed: {e}").into());
            }
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let config = MapConfig::from_page();
    let rows: RwSignal<Vec<ListEntry>> = RwSignal::new(Vec::new());
    let panel: RwSignal<PanelState> = RwSignal::new(PanelState::default());
    let controller: Controller = Controller(StoredValue::new_local(None));

    provide_context(ShelterRows(rows));
    provide_context(PanelOpen(panel));
    provide_context(controller);

    let map_ref = NodeRef::<leptos::html::Div>::new();

    // Build the map once its container is in the DOM.
    Effect::new(move || {
        let Some(container) = map_ref.get() else {
            return;
        };
        if controller.is_mounted() {
            return;
        }
        let surface = LeafletSurface::new(container.into(), rows, panel);
        let map = MapViewController::new(surface, config.clone());
        controller.0.set_value(Some(map));
        remove_loading_shell();
        load_shelters(controller);
    });

    view! {
        <div style="width: 100%; height: 100%; position: relative; overflow: hidden;">
            <div id="map" node_ref=map_ref style="width: 100%; height: 100%;" />
            <ShelterPanel />
        </div>
    }
}
