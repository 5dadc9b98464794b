pub mod admin;
pub mod citizen;
