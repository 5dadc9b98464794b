use serde::{Deserialize, Serialize};
use super::report::ReportStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub total_reports: u32,
    pub reports_resolved: u32,
    pub avg_resolution_time: String,
    pub active_departments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentReport {
    pub id: String,
    pub issue: String,
    pub status: String,
    pub time: String,
}

impl RecentReport {
    pub fn status(&self) -> ReportStatus {
        ReportStatus::parse(&self.status).unwrap_or(ReportStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPerformance {
    pub name: String,
    pub resolved: u32,
    pub total: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub kpis: KpiData,
    pub recent_reports: Vec<RecentReport>,
    pub department_performance: Vec<DepartmentPerformance>,
}

impl DashboardData {
    /// Percentage of resolved reports, rounded; 0 when there are no reports
    pub fn resolution_rate(&self) -> u32 {
        if self.kpis.total_reports == 0 {
            return 0;
        }
        let ratio = self.kpis.reports_resolved as f64 / self.kpis.total_reports as f64;
        (ratio * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(total: u32, resolved: u32) -> DashboardData {
        DashboardData {
            kpis: KpiData {
                total_reports: total,
                reports_resolved: resolved,
                avg_resolution_time: "3.2 days".into(),
                active_departments: 4,
            },
            recent_reports: vec![],
            department_performance: vec![],
        }
    }

    #[test]
    fn resolution_rate_rounds_and_handles_empty() {
        assert_eq!(dashboard(3, 2).resolution_rate(), 67);
        assert_eq!(dashboard(0, 0).resolution_rate(), 0);
    }

    #[test]
    fn decodes_api_payload() {
        let json = r#"{
            "kpis": {"totalReports": 10, "reportsResolved": 4, "avgResolutionTime": "3.2 days", "activeDepartments": 4},
            "recentReports": [{"id": "9", "issue": "Broken light", "status": "in_progress", "time": "2 hours ago"}],
            "departmentPerformance": [{"name": "Public Works", "resolved": 156, "total": 200, "rate": 78}]
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.recent_reports[0].status(), ReportStatus::InProgress);
        assert_eq!(data.department_performance[0].rate, 78.0);
    }
}
