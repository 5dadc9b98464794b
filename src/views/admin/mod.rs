pub mod analytics;
pub mod dashboard;
pub mod departments;
pub mod login;
pub mod not_found;
pub mod reports;

pub use analytics::Analytics;
pub use dashboard::Dashboard;
pub use departments::Departments;
pub use login::AdminLogin;
pub use not_found::NotFound;
pub use reports::Reports;
