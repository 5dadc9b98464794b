// ============================================================================
// REPORT MAP - one map component for marker overviews and the location picker
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use crate::maps::{LeafletRenderer, MapMarker, MapRenderer};
use crate::models::Location;

#[derive(Clone, PartialEq)]
pub enum MapMode {
    /// Read-only report markers with popups
    Markers(Vec<MapMarker>),
    /// One movable pin; clicks are reported through `on_select`
    Picker {
        position: Option<Location>,
        on_select: Callback<(f64, f64)>,
    },
}

#[derive(Properties, PartialEq)]
pub struct ReportMapProps {
    pub mode: MapMode,
    pub center: Location,
    pub zoom: f64,
    #[prop_or(AttrValue::Static("400px"))]
    pub height: AttrValue,
    #[prop_or_default]
    pub scroll_zoom: bool,
}

#[function_component(ReportMap)]
pub fn report_map(props: &ReportMapProps) -> Html {
    let container = use_node_ref();
    let renderer: Rc<RefCell<Option<LeafletRenderer>>> = use_mut_ref(|| None);
    let click_target: Rc<RefCell<Option<Callback<(f64, f64)>>>> = use_mut_ref(|| None);
    let failed = use_state(|| false);

    // always the latest picker callback, read by the click handler
    *click_target.borrow_mut() = match &props.mode {
        MapMode::Picker { on_select, .. } => Some(on_select.clone()),
        MapMode::Markers(_) => None,
    };

    {
        let container = container.clone();
        let renderer = renderer.clone();
        let click_target = click_target.clone();
        let failed = failed.clone();
        let (center, zoom, scroll_zoom) = (props.center, props.zoom, props.scroll_zoom);
        use_effect_with((), move |_| {
            if let Some(element) = container.cast::<web_sys::HtmlElement>() {
                match LeafletRenderer::mount(&element, center, zoom, scroll_zoom) {
                    Ok(mut map) => {
                        let on_click: Rc<dyn Fn(f64, f64)> = Rc::new(move |lat, lng| {
                            if let Some(target) = click_target.borrow().as_ref() {
                                target.emit((lat, lng));
                            }
                        });
                        if let Err(e) = map.on_click(on_click) {
                            log::warn!("⚠️ {}", e);
                        }
                        *renderer.borrow_mut() = Some(map);
                    }
                    Err(e) => {
                        log::error!("❌ {}", e);
                        failed.set(true);
                    }
                }
            }
            let renderer = renderer.clone();
            move || {
                renderer.borrow_mut().take();
            }
        });
    }

    {
        let renderer = renderer.clone();
        let zoom = props.zoom;
        use_effect_with((props.mode.clone(), *failed), move |(mode, _)| {
            if let Some(map) = renderer.borrow_mut().as_mut() {
                let result = match mode {
                    MapMode::Markers(markers) => map.set_markers(markers),
                    // keep the chosen point in view, as a GPS fix may be far away
                    MapMode::Picker { position: Some(position), .. } => map
                        .set_view(*position, zoom)
                        .and_then(|_| map.set_selection(Some(*position))),
                    MapMode::Picker { position: None, .. } => map.set_selection(None),
                };
                if let Err(e) = result {
                    log::warn!("⚠️ {}", e);
                }
            }
            || ()
        });
    }

    if *failed {
        return html! {
            <div class="map-unavailable" style={format!("height: {}", props.height)}>
                {"Map could not be loaded."}
            </div>
        };
    }

    html! {
        <div class="report-map" ref={container} style={format!("height: {}; width: 100%", props.height)}></div>
    }
}
