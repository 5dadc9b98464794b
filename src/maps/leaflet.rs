// ============================================================================
// LEAFLET - bindings to the global `L` and a MapRenderer over them
// ============================================================================

use std::rc::Rc;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::models::Location;
use super::traits::{MapError, MapMarker, MapRenderer, TILE_ATTRIBUTION, TILE_URL};

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(element: &web_sys::HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap);

    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(lat_lng: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, target: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str) -> Layer;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &Layer);

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Layer, lat_lng: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &Layer) -> LeafletMap;
}

fn lat_lng(location: Location) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(location.latitude));
    pair.push(&JsValue::from_f64(location.longitude));
    pair.into()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    scroll_wheel_zoom: bool,
}

#[derive(Serialize)]
struct TileOptions {
    attribution: &'static str,
}

fn js_options<T: Serialize>(options: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(options).map_err(|e| MapError::Js(e.to_string()))
}

pub struct LeafletRenderer {
    map: LeafletMap,
    markers: Layer,
    selection: Option<Layer>,
    click_handler: Option<Closure<dyn FnMut(JsValue)>>,
}

impl LeafletRenderer {
    pub fn mount(element: &web_sys::HtmlElement, center: Location, zoom: f64, scroll_zoom: bool) -> Result<Self, MapError> {
        let options = js_options(&MapOptions { scroll_wheel_zoom: scroll_zoom })?;
        let map = create_map(element, &options)
            .map_err(|e| MapError::LibraryMissing(format!("{:?}", e)))?;
        map.set_view(&lat_lng(center), zoom);

        let tile_options = js_options(&TileOptions { attribution: TILE_ATTRIBUTION })?;
        tile_layer(TILE_URL, &tile_options).add_to(&map);

        let markers = layer_group();
        markers.add_to(&map);

        log::info!("🗺️ Leaflet map mounted at ({}, {})", center.latitude, center.longitude);
        Ok(Self { map, markers, selection: None, click_handler: None })
    }
}

impl MapRenderer for LeafletRenderer {
    fn set_view(&mut self, center: Location, zoom: f64) -> Result<(), MapError> {
        self.map.set_view(&lat_lng(center), zoom);
        Ok(())
    }

    fn set_markers(&mut self, markers: &[MapMarker]) -> Result<(), MapError> {
        self.markers.clear_layers();
        let group: &JsValue = self.markers.as_ref();
        for item in markers {
            marker(&lat_lng(item.location))
                .bind_popup(&item.popup_html())
                .add_to(group);
        }
        log::debug!("🗺️ {} markers on map", markers.len());
        Ok(())
    }

    fn set_selection(&mut self, position: Option<Location>) -> Result<(), MapError> {
        match (position, &self.selection) {
            (Some(location), Some(pin)) => {
                pin.set_lat_lng(&lat_lng(location));
            }
            (Some(location), None) => {
                let pin = marker(&lat_lng(location));
                pin.add_to(self.map.as_ref());
                self.selection = Some(pin);
            }
            (None, Some(pin)) => {
                self.map.remove_layer(pin);
                self.selection = None;
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn on_click(&mut self, handler: Rc<dyn Fn(f64, f64)>) -> Result<(), MapError> {
        let closure = Closure::wrap(Box::new(move |event: JsValue| {
            let point = js_sys::Reflect::get(&event, &JsValue::from_str("latlng")).unwrap_or(JsValue::UNDEFINED);
            let read = |key: &str| {
                js_sys::Reflect::get(&point, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_f64())
            };
            if let (Some(lat), Some(lng)) = (read("lat"), read("lng")) {
                handler(lat, lng);
            }
        }) as Box<dyn FnMut(JsValue)>);

        self.map.on("click", closure.as_ref().unchecked_ref());
        // kept alive for as long as the map is
        self.click_handler = Some(closure);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Detaches the map from its element
impl Drop for LeafletRenderer {
    fn drop(&mut self) {
        self.map.remove();
    }
}
