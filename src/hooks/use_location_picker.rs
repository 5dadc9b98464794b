// ============================================================================
// USE LOCATION PICKER HOOK - geolocation + map selection for a form
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use crate::config::CONFIG;
use crate::maps::geolocation::request_current_position;
use crate::models::Location;
use crate::state::{GeolocationError, LocationPickerState};
use crate::stores::{Toast, ToastStore};

#[derive(Clone)]
pub struct UseLocationPickerHandle {
    pub position: Option<Location>,
    pub locating: bool,
    pub error: Option<GeolocationError>,
    /// Map click
    pub select: Callback<(f64, f64)>,
    /// "Use My Location" button
    pub locate: Callback<()>,
}

#[hook]
pub fn use_location_picker(
    initial: Option<Location>,
    on_select: Callback<Location>,
    toasts: ToastStore,
) -> UseLocationPickerHandle {
    let state = use_mut_ref(|| LocationPickerState::new(initial));
    let rerender = use_force_update();

    // A lookup started on mount may finish several renders later
    let latest_on_select = use_mut_ref(|| on_select.clone());
    *latest_on_select.borrow_mut() = on_select;

    let select: Rc<dyn Fn(f64, f64, bool)> = {
        let state = state.clone();
        let rerender = rerender.clone();
        Rc::new(move |lat: f64, lng: f64, from_gps: bool| {
            let location = if from_gps {
                state.borrow_mut().locate_succeeded(lat, lng)
            } else {
                state.borrow_mut().select(lat, lng)
            };
            let on_select = latest_on_select.borrow().clone();
            on_select.emit(location);
            rerender.force_update();
        })
    };

    let locate: Rc<dyn Fn()> = {
        let state = state.clone();
        let rerender = rerender.clone();
        let select = select.clone();
        let toasts = toasts.clone();
        Rc::new(move || {
            if !state.borrow_mut().begin_locate() {
                return;
            }
            rerender.force_update();

            let on_found = {
                let select = select.clone();
                let toasts = toasts.clone();
                move |lat: f64, lng: f64| {
                    select(lat, lng, true);
                    toasts.push(
                        Toast::success("Location Obtained")
                            .with_description("Your current location has been set on the map."),
                    );
                }
            };
            let on_failed = {
                let state = state.clone();
                let rerender = rerender.clone();
                let toasts = toasts.clone();
                move |error: GeolocationError| {
                    let generation = state.borrow_mut().locate_failed(error);
                    let title = match error {
                        GeolocationError::Unsupported => "Geolocation Not Supported",
                        _ => "Location Error",
                    };
                    toasts.push(Toast::error(title).with_description(error.with_hint()));
                    rerender.force_update();

                    let state = state.clone();
                    let rerender = rerender.clone();
                    Timeout::new(CONFIG.ui_config.location_error_clear_ms, move || {
                        state.borrow_mut().clear_error(generation);
                        rerender.force_update();
                    })
                    .forget();
                }
            };
            request_current_position(on_found, on_failed);
        })
    };

    {
        let state = state.clone();
        let locate = locate.clone();
        use_effect_with((), move |_| {
            if state.borrow().should_auto_locate() {
                log::info!("📍 No location yet, asking the browser");
                locate();
            }
            || ()
        });
    }

    let snapshot = state.borrow();
    UseLocationPickerHandle {
        position: snapshot.position(),
        locating: snapshot.is_locating(),
        error: snapshot.error(),
        select: Callback::from(move |(lat, lng): (f64, f64)| select(lat, lng, false)),
        locate: Callback::from(move |_| locate()),
    }
}
