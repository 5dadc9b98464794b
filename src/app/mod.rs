pub mod admin;
pub mod citizen;

pub use admin::AdminApp;
pub use citizen::CitizenApp;
