// ============================================================================
// GEOLOCATION - one-shot browser position lookup
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PositionOptions;
use crate::state::GeolocationError;

pub const HIGH_ACCURACY: bool = true;
pub const TIMEOUT_MS: u32 = 15_000;
pub const MAXIMUM_AGE_MS: u32 = 300_000;

fn read_f64(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

/// Calls exactly one of the two handlers, possibly synchronously
pub fn request_current_position(
    on_success: impl FnOnce(f64, f64) + 'static,
    on_error: impl FnOnce(GeolocationError) + 'static,
) {
    let geolocation = web_sys::window().and_then(|w| w.navigator().geolocation().ok());
    let Some(geolocation) = geolocation else {
        log::warn!("⚠️ Geolocation API unavailable");
        on_error(GeolocationError::Unsupported);
        return;
    };
    let on_error = OnceError::new(on_error);

    let success = {
        let on_error = on_error.clone();
        Closure::once_into_js(move |position: JsValue| {
            let latitude = read_f64(&position, &["coords", "latitude"]);
            let longitude = read_f64(&position, &["coords", "longitude"]);
            match coordinates(latitude, longitude) {
                Ok((lat, lng)) => {
                    log::info!("📍 Position obtained ({:.6}, {:.6})", lat, lng);
                    on_success(lat, lng);
                }
                Err(error) => {
                    log::error!("❌ Position without coordinates");
                    on_error.fail(error);
                }
            }
        })
    };
    let failure = {
        let on_error = on_error.clone();
        Closure::once_into_js(move |error: JsValue| {
            let code = read_f64(&error, &["code"]).unwrap_or(0.0) as u16;
            let error = GeolocationError::from_code(code);
            log::warn!("⚠️ Geolocation failed: {}", error);
            on_error.fail(error);
        })
    };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(HIGH_ACCURACY);
    options.set_timeout(TIMEOUT_MS);
    options.set_maximum_age(MAXIMUM_AGE_MS);

    if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
        success.unchecked_ref(),
        Some(failure.unchecked_ref()),
        &options,
    ) {
        log::error!("❌ getCurrentPosition threw: {:?}", e);
        on_error.fail(GeolocationError::Unknown);
    }
}

/// Hands the error handler to whichever path fails first; later calls are ignored
#[derive(Clone)]
struct OnceError(Rc<RefCell<Option<Box<dyn FnOnce(GeolocationError)>>>>);

impl OnceError {
    fn new(handler: impl FnOnce(GeolocationError) + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(handler)))))
    }

    fn fail(&self, error: GeolocationError) {
        let handler = self.0.borrow_mut().take();
        if let Some(handler) = handler {
            handler(error);
        }
    }
}

/// A position is only usable when both coordinates are finite numbers
pub fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(f64, f64), GeolocationError> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Ok((lat, lng)),
        _ => Err(GeolocationError::Unknown),
    }
}
