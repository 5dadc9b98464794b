pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod department;
pub mod report;

pub use analytics::{AnalyticsData, AnalyticsSummary, CategorySlice};
pub use auth::{Credentials, MessageResponse, RegisterRequest, TokenResponse};
pub use dashboard::{DashboardData, DepartmentPerformance, KpiData, RecentReport};
pub use department::{Department, DepartmentCreate, DepartmentUpdate};
pub use report::{
    Location, PaginatedReports, Report, ReportDraft, ReportRecord, ReportStatus, ReportSubmission,
    SelectedFile, REPORT_CATEGORIES,
};
