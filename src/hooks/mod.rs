pub mod use_location_picker;
pub mod use_query;

pub use use_location_picker::{use_location_picker, UseLocationPickerHandle};
pub use use_query::{use_query, UseQueryHandle};
