use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories the admin filter offers. The backend classifies reports itself,
/// so a report may carry a category outside this list.
pub const REPORT_CATEGORIES: [&str; 4] = ["Infrastructure", "Safety", "Public Service", "Other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "Pending", alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "in_progress", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Resolved", alias = "resolved")]
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        }
    }

    /// Wire value expected by the API (`pending`, `in_progress`, `resolved`)
    pub fn backend_value(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
        }
    }

    /// Accepts both display labels and backend values
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Pending" | "pending" => Some(ReportStatus::Pending),
            "In Progress" | "in_progress" | "InProgress" => Some(ReportStatus::InProgress),
            "Resolved" | "resolved" => Some(ReportStatus::Resolved),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "status-pending",
            ReportStatus::InProgress => "status-in-progress",
            ReportStatus::Resolved => "status-resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub description: String,
    pub status: ReportStatus,
    pub category: Option<String>,
    pub submitted_date: String,
    pub image_url: Option<String>,
    pub location: Option<Location>,
    pub citizen_id: String,
}

impl Report {
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

/// Report as the API returns it. Both portals decode through this record:
/// it accepts the backend shape (numeric id, snake_case, flat coordinates)
/// as well as the already-transformed shape, and fills gaps with defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "submittedDate")]
    pub created_at: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default, alias = "citizenId")]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub department_id: Option<i64>,
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<ReportRecord> for Report {
    fn from(record: ReportRecord) -> Self {
        let location = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location { latitude, longitude }),
            _ => record
                .location
                .and_then(|value| serde_json::from_value::<Location>(value).ok()),
        };

        let image_url = record
            .image_urls
            .and_then(|urls| urls.into_iter().next())
            .or(record.image_url);

        Report {
            id: value_to_string(&record.id).unwrap_or_else(|| "unknown".to_string()),
            description: record
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            status: record
                .status
                .as_deref()
                .and_then(ReportStatus::parse)
                .unwrap_or(ReportStatus::Pending),
            category: record.category.filter(|c| !c.is_empty()),
            submitted_date: record
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            image_url,
            location,
            citizen_id: record
                .user_id
                .as_ref()
                .and_then(value_to_string)
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Admin report list for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedReports {
    pub reports: Vec<Report>,
    /// Estimated, see `utils::pagination::estimate_total_count`
    pub total_count: usize,
}

/// Image chosen in the submission form
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub handle: Option<web_sys::File>,
}

impl SelectedFile {
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            handle: Some(file),
        }
    }
}

/// Citizen submission form contents before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<SelectedFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSubmission {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_record_is_reshaped() {
        let record: ReportRecord = serde_json::from_value(json!({
            "id": 42,
            "description": "Pothole near the bus stop",
            "status": "in_progress",
            "category": "Infrastructure",
            "created_at": "2024-03-02T09:15:00",
            "latitude": 28.61,
            "longitude": 77.2,
            "image_urls": ["https://cdn/a.jpg", "https://cdn/b.jpg"],
            "user_id": 7,
            "department_id": 3
        }))
        .unwrap();

        let report = Report::from(record);
        assert_eq!(report.id, "42");
        assert_eq!(report.status, ReportStatus::InProgress);
        assert_eq!(report.submitted_date, "2024-03-02T09:15:00");
        assert_eq!(report.image_url.as_deref(), Some("https://cdn/a.jpg"));
        assert_eq!(report.location, Some(Location::new(28.61, 77.2)));
        assert_eq!(report.citizen_id, "7");
    }

    #[test]
    fn loose_record_falls_back_to_defaults() {
        let record: ReportRecord = serde_json::from_value(json!({
            "id": "r-1",
            "status": "Escalated",
            "location": { "latitude": "north", "longitude": 1.0 }
        }))
        .unwrap();

        let report = Report::from(record);
        assert_eq!(report.id, "r-1");
        assert_eq!(report.description, "No description");
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.location, None);
        assert_eq!(report.citizen_id, "Unknown");
        assert_eq!(report.category_label(), "Uncategorized");
    }

    #[test]
    fn status_accepts_labels_and_wire_values() {
        for status in ReportStatus::ALL {
            assert_eq!(ReportStatus::parse(status.label()), Some(status));
            assert_eq!(ReportStatus::parse(status.backend_value()), Some(status));
        }
        let decoded: ReportStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(decoded, ReportStatus::InProgress);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), "\"In Progress\"");
    }
}
