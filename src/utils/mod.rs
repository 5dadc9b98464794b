// Shared helpers without browser dependencies

pub mod format;
pub mod pagination;
pub mod validation;

pub use format::{format_count, format_date, DateStyle};
pub use pagination::{estimate_total_count, total_pages};
pub use validation::{Field, ValidationErrors};
