pub mod admin_layout;
pub mod citizen_layout;
pub mod form;
pub mod link;
pub mod load_error;
pub mod location_picker;
pub mod report_map;
pub mod route_guard;
pub mod status_badge;
pub mod toaster;

pub use admin_layout::AdminLayout;
pub use citizen_layout::CitizenLayout;
pub use form::{ErrorPanel, FieldError, Skeleton};
pub use link::Link;
pub use load_error::{LoadError, LoadFailure};
pub use location_picker::LocationPicker;
pub use report_map::{MapMode, ReportMap};
pub use route_guard::RouteGuard;
pub use status_badge::StatusBadge;
pub use toaster::Toaster;
