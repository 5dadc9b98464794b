use yew::prelude::*;
use crate::config::CONFIG;
use crate::hooks::use_location_picker;
use crate::models::Location;
use crate::stores::ToastStore;
use super::report_map::{MapMode, ReportMap};

#[derive(Properties, PartialEq)]
pub struct LocationPickerProps {
    pub on_select: Callback<Location>,
    #[prop_or_default]
    pub initial: Option<Location>,
    pub toasts: ToastStore,
}

#[function_component(LocationPicker)]
pub fn location_picker(props: &LocationPickerProps) -> Html {
    let picker = use_location_picker(props.initial, props.on_select.clone(), props.toasts.clone());
    let map = &CONFIG.map_config;
    let center = picker
        .position
        .unwrap_or_else(|| Location::new(map.admin_center_lat, map.admin_center_lng));

    let on_locate = picker.locate.reform(|_: MouseEvent| ());

    html! {
        <div class="card location-picker">
            <div class="card-header location-picker-header">
                <h3 class="card-title">{"Select Report Location"}</h3>
                <button type="button" class="btn btn-outline btn-sm" onclick={on_locate} disabled={picker.locating}>
                    { if picker.locating { "Getting Location..." } else { "Use My Location" } }
                </button>
            </div>
            <div class="location-picker-map">
                <ReportMap
                    mode={MapMode::Picker { position: picker.position, on_select: picker.select.clone() }}
                    {center}
                    zoom={map.picker_zoom}
                    height="300px"
                />
                <div class="map-overlay map-overlay-top">
                    {
                        match picker.position {
                            Some(p) => format!("Location selected: {:.6}, {:.6}", p.latitude, p.longitude),
                            None => "Click on the map to select the issue location".to_string(),
                        }
                    }
                </div>
                if let Some(error) = picker.error {
                    <div class="map-overlay map-overlay-error">{ error.to_string() }</div>
                }
            </div>
            <div class="location-picker-details">
                if let Some(p) = picker.position {
                    <div><strong>{"Latitude:"}</strong>{ format!(" {:.6}", p.latitude) }</div>
                    <div><strong>{"Longitude:"}</strong>{ format!(" {:.6}", p.longitude) }</div>
                    <div class="hint-success">{"✓ Location set. You can click elsewhere on the map to change it."}</div>
                } else {
                    <div class="hint-empty">
                        <div>{"No location selected yet."}</div>
                        <div class="hint-small">{"Use \"Use My Location\" button or click on the map."}</div>
                    </div>
                }
            </div>
        </div>
    }
}
