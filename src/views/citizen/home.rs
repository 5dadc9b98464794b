// ============================================================================
// CITIZEN HOME - banner, public report map and the latest reports
// ============================================================================

use yew::prelude::*;
use crate::components::{CitizenLayout, LoadError, MapMode, ReportMap, Skeleton, StatusBadge};
use crate::config::CONFIG;
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::maps::MapMarker;
use crate::models::{Location, Report};
use crate::router::{navigate, CitizenRoute, Route};
use crate::services::citizen_api::PUBLIC_REPORTS;
use crate::services::{CitizenApi, QueryKey};
use crate::utils::{format_date, DateStyle};

const RECENT_COUNT: usize = 3;

/// Newest first by submission timestamp
fn most_recent(reports: &[Report], count: usize) -> Vec<Report> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));
    sorted.truncate(count);
    sorted
}

fn report_card(report: &Report) -> Html {
    html! {
        <div class="card report-card" key={report.id.clone()}>
            <div class="card-content">
                <div class="row-between">
                    <StatusBadge status={report.status} />
                    <span class="text-muted text-sm">{ format!("📅 {}", format_date(&report.submitted_date, DateStyle::Short)) }</span>
                </div>
                <p class="report-description">{ &report.description }</p>
                if let Some(location) = report.location {
                    <p class="report-coordinates">
                        { format!("📍 {:.4}, {:.4}", location.latitude, location.longitude) }
                    </p>
                }
            </div>
        </div>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let portal = use_portal::<CitizenApi>();
    let reports = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(PUBLIC_REPORTS), move || {
            let api = api.clone();
            async move { api.fetch_all_reports().await }
        })
    };

    let go = |route: CitizenRoute| Callback::from(move |_: MouseEvent| navigate(route.path()));
    let map = &CONFIG.map_config;
    let all: &[Report] = reports.data.as_deref().map(Vec::as_slice).unwrap_or(&[]);
    let recent = most_recent(all, RECENT_COUNT);

    html! {
        <CitizenLayout>
            <div class="stack-lg">
                <section class="gov-banner">
                    <h1 class="banner-title">{"Report Civic Issues in Your City"}</h1>
                    <p class="banner-text">
                        {"Help improve your community by reporting infrastructure problems, safety concerns, and public service issues."}
                    </p>
                    <button type="button" class="btn btn-secondary btn-lg" onclick={go(CitizenRoute::Report)}>
                        {"+ Report an Issue"}
                    </button>
                </section>

                <section class="map-section">
                    if reports.is_initial_load() {
                        <Skeleton class="skeleton-map" />
                    } else {
                        <ReportMap
                            mode={MapMode::Markers(MapMarker::from_reports(all))}
                            center={Location::new(map.citizen_center_lat, map.citizen_center_lng)}
                            zoom={map.overview_zoom}
                            height="384px"
                        />
                    }
                </section>

                <section>
                    <div class="row-between section-header">
                        <h2 class="section-title">{"Recent Reports"}</h2>
                        <button type="button" class="btn btn-outline" onclick={go(CitizenRoute::MyReports)}>
                            {"⚠️ View All Reports"}
                        </button>
                    </div>
                    if let (Some(err), None) = (&reports.error, &reports.data) {
                        <LoadError
                            error={err.clone()}
                            title="Could not load reports"
                            on_retry={reports.refetch.clone()}
                            login_path={CitizenRoute::Login.path()}
                        />
                    } else if recent.is_empty() && !reports.loading {
                        <p class="text-muted">{"No reports have been submitted yet."}</p>
                    } else {
                        <div class="card-grid">
                            { for recent.iter().map(report_card) }
                        </div>
                    }
                </section>
            </div>
        </CitizenLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportStatus;

    fn report(id: &str, submitted: &str) -> Report {
        Report {
            id: id.into(),
            description: "Streetlight out".into(),
            status: ReportStatus::Pending,
            category: None,
            submitted_date: submitted.into(),
            image_url: None,
            location: None,
            citizen_id: "1".into(),
        }
    }

    #[test]
    fn most_recent_sorts_newest_first_and_truncates() {
        let reports = vec![
            report("a", "2024-01-10T09:45:00"),
            report("b", "2024-03-02T09:15:00"),
            report("c", "2024-02-01T12:00:00"),
            report("d", "2023-12-24T18:30:00"),
        ];
        let ids: Vec<_> = most_recent(&reports, 3).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(most_recent(&[], 3).is_empty());
    }
}
