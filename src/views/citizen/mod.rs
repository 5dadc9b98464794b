pub mod home;
pub mod login;
pub mod my_reports;
pub mod report;
pub mod signup;

pub use home::Home;
pub use login::CitizenLogin;
pub use my_reports::MyReports;
pub use report::ReportIssue;
pub use signup::Signup;
