use std::fmt;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use super::report::ReportStatus;

pub const CATEGORY_PALETTE: [&str; 4] = ["#0A5EB0", "#F57C00", "#2E7D32", "#9C27B0"];

/// `/api/analytics` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsSummary {
    pub total_reports: u32,
    /// In the order the API lists them, so palette colours stay put
    #[serde(default, deserialize_with = "ordered_counts")]
    pub reports_by_category: Vec<(String, u32)>,
    #[serde(default, deserialize_with = "ordered_counts")]
    pub reports_by_status: Vec<(String, u32)>,
}

/// `{"name": count, ...}` as a list in document order
fn ordered_counts<'de, D>(deserializer: D) -> Result<Vec<(String, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountsVisitor;

    impl<'de> Visitor<'de> for CountsVisitor {
        type Value = Vec<(String, u32)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of names to counts")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut counts = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, u32>()? {
                counts.push(entry);
            }
            Ok(counts)
        }
    }

    deserializer.deserialize_map(CountsVisitor)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReports {
    pub month: &'static str,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionTimePoint {
    pub date: &'static str,
    pub days: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsData {
    pub total_reports: u32,
    pub category_distribution: Vec<CategorySlice>,
    pub status_distribution: Vec<(ReportStatus, u32)>,
    pub monthly_reports: Vec<MonthlyReports>,
    pub resolution_time_trend: Vec<ResolutionTimePoint>,
}

// The API does not expose time series yet; these match what the dashboard
// has always shown until it does.
const MONTHLY_PLACEHOLDER: [(&str, u32); 6] = [
    ("Aug", 89), ("Sep", 112), ("Oct", 134), ("Nov", 156), ("Dec", 143), ("Jan", 167),
];
const RESOLUTION_PLACEHOLDER: [(&str, f64); 6] = [
    ("Week 1", 4.2), ("Week 2", 3.8), ("Week 3", 3.5), ("Week 4", 3.2), ("Week 5", 2.9), ("Week 6", 3.1),
];

impl From<AnalyticsSummary> for AnalyticsData {
    fn from(summary: AnalyticsSummary) -> Self {
        let category_distribution = summary
            .reports_by_category
            .into_iter()
            .enumerate()
            .map(|(index, (name, value))| CategorySlice {
                name,
                value,
                color: CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
            })
            .collect();

        let mut status_distribution: Vec<(ReportStatus, u32)> = ReportStatus::ALL
            .iter()
            .map(|status| (*status, 0))
            .collect();
        for (raw, count) in summary.reports_by_status {
            if let Some(status) = ReportStatus::parse(&raw) {
                if let Some(slot) = status_distribution.iter_mut().find(|(s, _)| *s == status) {
                    slot.1 += count;
                }
            }
        }

        Self {
            total_reports: summary.total_reports,
            category_distribution,
            status_distribution,
            monthly_reports: MONTHLY_PLACEHOLDER
                .iter()
                .map(|&(month, total)| MonthlyReports { month, total })
                .collect(),
            resolution_time_trend: RESOLUTION_PLACEHOLDER
                .iter()
                .map(|&(date, days)| ResolutionTimePoint { date, days })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_turned_into_chart_series() {
        let summary: AnalyticsSummary = serde_json::from_str(
            r#"{
                "total_reports": 9,
                "reports_by_category": {"Safety": 1, "Infrastructure": 4, "Zoning": 1, "Public Service": 2, "Other": 1},
                "reports_by_status": {"pending": 5, "in_progress": 3, "resolved": 1}
            }"#,
        )
        .unwrap();

        let data = AnalyticsData::from(summary);
        assert_eq!(data.category_distribution.len(), 5);
        let names: Vec<&str> = data.category_distribution.iter().map(|slice| slice.name.as_str()).collect();
        assert_eq!(names, vec!["Safety", "Infrastructure", "Zoning", "Public Service", "Other"]);
        assert_eq!(data.category_distribution[0].color, "#0A5EB0");
        assert_eq!(data.category_distribution[1].color, "#F57C00");
        // palette wraps around
        assert_eq!(data.category_distribution[4].color, "#0A5EB0");
        assert_eq!(
            data.status_distribution,
            vec![
                (ReportStatus::Pending, 5),
                (ReportStatus::InProgress, 3),
                (ReportStatus::Resolved, 1)
            ]
        );
        assert_eq!(data.monthly_reports.len(), 6);
    }
}
