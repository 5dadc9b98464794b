use std::rc::Rc;
use thiserror::Error;
use crate::models::{Location, Report, ReportStatus};

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Common surface of the map backends
pub trait MapRenderer {
    fn set_view(&mut self, center: Location, zoom: f64) -> Result<(), MapError>;

    /// Replaces every report marker
    fn set_markers(&mut self, markers: &[MapMarker]) -> Result<(), MapError>;

    /// Single picker pin; `None` removes it
    fn set_selection(&mut self, position: Option<Location>) -> Result<(), MapError>;

    fn on_click(&mut self, handler: Rc<dyn Fn(f64, f64)>) -> Result<(), MapError>;

    fn is_ready(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub location: Location,
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
}

impl MapMarker {
    /// Reports without coordinates get no marker
    pub fn from_report(report: &Report) -> Option<Self> {
        let location = report.location?;
        Some(Self {
            id: report.id.clone(),
            location,
            title: format!("{}: {}", report.id, report.category_label()),
            description: report.description.clone(),
            status: report.status,
        })
    }

    pub fn from_reports(reports: &[Report]) -> Vec<Self> {
        reports.iter().filter_map(Self::from_report).collect()
    }

    pub fn popup_html(&self) -> String {
        format!(
            "<div class=\"font-semibold\">{}</div><p class=\"text-xs\">{}</p><span class=\"status-badge {}\">{}</span>",
            escape_html(&self.title),
            escape_html(&self.description),
            self.status.css_class(),
            self.status.label(),
        )
    }
}

/// Popup contents come from citizens; never hand them to the DOM raw
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Map library unavailable: {0}")]
    LibraryMissing(String),
    #[error("Map error: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, location: Option<Location>) -> Report {
        Report {
            id: id.into(),
            description: "<b>Sewage</b> overflow".into(),
            status: ReportStatus::Pending,
            category: Some("Infrastructure".into()),
            submitted_date: "2024-03-02".into(),
            image_url: None,
            location,
            citizen_id: "1".into(),
        }
    }

    #[test]
    fn reports_without_location_are_skipped() {
        let markers = MapMarker::from_reports(&[
            report("1", Some(Location::new(28.6, 77.2))),
            report("2", None),
        ]);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "1: Infrastructure");
    }

    #[test]
    fn popup_escapes_user_text() {
        let marker = MapMarker::from_report(&report("1", Some(Location::new(0.0, 0.0)))).unwrap();
        let html = marker.popup_html();
        assert!(html.contains("&lt;b&gt;Sewage&lt;/b&gt; overflow"));
        assert!(html.contains("status-pending"));
    }
}
