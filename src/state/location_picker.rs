// ============================================================================
// LOCATION PICKER STATE - selected point, geolocation progress, errors
// ============================================================================

use thiserror::Error;
use crate::models::Location;

pub const MANUAL_HINT: &str = "You can click on the map to set location manually.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied. Please enable location permissions.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("Location request timed out.")]
    Timeout,
    #[error("Geolocation is not supported by this browser.")]
    Unsupported,
    /// Malformed position, or `getCurrentPosition` threw
    #[error("Unable to get your location.")]
    Unknown,
}

impl GeolocationError {
    /// `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }

    /// Toast text: the cause plus the manual fallback
    pub fn with_hint(&self) -> String {
        format!("{} {}", self, MANUAL_HINT)
    }
}

/// Six decimals, roughly 10 cm
pub fn round_coordinate(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPickerState {
    position: Option<Location>,
    locating: bool,
    auto_requested: bool,
    error: Option<GeolocationError>,
    error_generation: u32,
}

impl LocationPickerState {
    pub fn new(initial: Option<Location>) -> Self {
        Self { position: initial, ..Self::default() }
    }

    pub fn position(&self) -> Option<Location> {
        self.position
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn error(&self) -> Option<GeolocationError> {
        self.error
    }

    /// True exactly once, and only when nothing is selected yet
    pub fn should_auto_locate(&self) -> bool {
        !self.auto_requested && !self.locating && self.position.is_none()
    }

    /// Starts a lookup unless one is already running
    pub fn begin_locate(&mut self) -> bool {
        if self.locating {
            return false;
        }
        self.locating = true;
        self.auto_requested = true;
        self.error = None;
        true
    }

    /// Map click and geolocation success both land here
    pub fn select(&mut self, latitude: f64, longitude: f64) -> Location {
        let location = Location::new(round_coordinate(latitude), round_coordinate(longitude));
        self.position = Some(location);
        self.error = None;
        location
    }

    pub fn locate_succeeded(&mut self, latitude: f64, longitude: f64) -> Location {
        self.locating = false;
        self.select(latitude, longitude)
    }

    /// Returns a token for `clear_error`, so a timer never wipes a newer error
    pub fn locate_failed(&mut self, error: GeolocationError) -> u32 {
        self.locating = false;
        self.auto_requested = true;
        self.error = Some(error);
        self.error_generation = self.error_generation.wrapping_add(1);
        self.error_generation
    }

    pub fn clear_error(&mut self, generation: u32) {
        if generation == self.error_generation {
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_codes_map_to_messages() {
        assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(3).to_string(), "Location request timed out.");
        assert_eq!(
            GeolocationError::from_code(2).with_hint(),
            "Location information is unavailable. You can click on the map to set location manually."
        );
        assert_eq!(GeolocationError::from_code(9), GeolocationError::Unknown);
    }

    #[test]
    fn auto_locate_runs_once() {
        let mut state = LocationPickerState::new(None);
        assert!(state.should_auto_locate());
        assert!(state.begin_locate());
        assert!(!state.begin_locate());
        assert!(!state.should_auto_locate());

        state.locate_failed(GeolocationError::PermissionDenied);
        assert!(!state.should_auto_locate());

        assert!(!LocationPickerState::new(Some(Location::new(1.0, 2.0))).should_auto_locate());
    }

    #[test]
    fn selection_rounds_and_clears_error() {
        let mut state = LocationPickerState::new(None);
        state.begin_locate();
        state.locate_failed(GeolocationError::Timeout);
        assert_eq!(state.error(), Some(GeolocationError::Timeout));

        let chosen = state.select(28.474_412_345, 77.504_098_765);
        assert_eq!(chosen, Location::new(28.474412, 77.504099));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn stale_clear_timer_keeps_newer_error() {
        let mut state = LocationPickerState::new(None);
        let first = state.locate_failed(GeolocationError::Timeout);
        let second = state.locate_failed(GeolocationError::PositionUnavailable);

        state.clear_error(first);
        assert_eq!(state.error(), Some(GeolocationError::PositionUnavailable));
        state.clear_error(second);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failed_lookup_releases_the_locate_button() {
        let mut state = LocationPickerState::new(None);
        assert!(state.begin_locate());
        assert!(state.is_locating());

        state.locate_failed(GeolocationError::Unknown);
        assert!(!state.is_locating());
        assert_eq!(state.error(), Some(GeolocationError::Unknown));
        assert!(state.begin_locate());
    }
}
