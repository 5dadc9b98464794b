// ============================================================================
// MY REPORTS VIEW - status summary and history of the citizen's reports
// ============================================================================

use yew::prelude::*;
use crate::components::{CitizenLayout, Skeleton, StatusBadge};
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::models::{Report, ReportStatus};
use crate::router::{navigate, CitizenRoute, Route};
use crate::services::citizen_api::MY_REPORTS;
use crate::services::{CitizenApi, QueryKey};
use crate::utils::{format_date, DateStyle};

fn count_with_status(reports: &[Report], status: ReportStatus) -> usize {
    reports.iter().filter(|report| report.status == status).count()
}

fn coordinates_label(report: &Report) -> String {
    match report.location {
        Some(location) => format!("{:.4}, {:.4}", location.latitude, location.longitude),
        None => "Location not available".to_string(),
    }
}

fn go(route: CitizenRoute) -> Callback<MouseEvent> {
    Callback::from(move |_: MouseEvent| navigate(route.path()))
}

fn notice(icon: &'static str, title: &'static str, message: String, action: Html) -> Html {
    html! {
        <div class="card">
            <div class="card-content notice">
                <div class="notice-icon">{ icon }</div>
                <h3 class="notice-title">{ title }</h3>
                <p class="text-muted text-center">{ message }</p>
                <div class="button-row">{ action }</div>
            </div>
        </div>
    }
}

fn report_entry(report: &Report) -> Html {
    html! {
        <div class="card report-card" key={report.id.clone()}>
            <div class="card-header report-card-header">
                <div class="row-start">
                    <StatusBadge status={report.status} />
                    <span class="text-muted text-sm">
                        { format!("📅 Submitted {}", format_date(&report.submitted_date, DateStyle::Long)) }
                    </span>
                </div>
                if report.image_url.is_some() {
                    <span class="text-muted text-sm">{"🖼️ Photo attached"}</span>
                }
            </div>
            <div class="card-content">
                <p class="report-description">{ &report.description }</p>
                <div class="row-between report-footer">
                    <span class="report-coordinates">{ format!("📍 {}", coordinates_label(report)) }</span>
                    <span class="text-muted text-xs">{ format!("Report ID: {}", report.id) }</span>
                </div>
            </div>
        </div>
    }
}

#[function_component(MyReports)]
pub fn my_reports() -> Html {
    let portal = use_portal::<CitizenApi>();
    let query = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(MY_REPORTS), move || {
            let api = api.clone();
            async move { api.fetch_my_reports().await }
        })
    };

    if !portal.session.is_authenticated() {
        return html! {
            <CitizenLayout>
                <div class="centered-panel">
                    { notice(
                        "🔑",
                        "Login Required",
                        "Please log in to view your reports.".to_string(),
                        html! {
                            <button type="button" class="btn btn-primary" onclick={go(CitizenRoute::Login)}>
                                {"Go to Login"}
                            </button>
                        },
                    ) }
                </div>
            </CitizenLayout>
        };
    }

    let reports: &[Report] = query.data.as_deref().map(Vec::as_slice).unwrap_or(&[]);
    let loading = query.is_initial_load();

    let summary = ReportStatus::ALL.iter().map(|status| {
        html! {
            <div class={classes!("card", "summary-card", status.css_class())}>
                <div class="card-content row-between">
                    <div>
                        <p class="summary-label">{ status.label() }</p>
                        if loading {
                            <Skeleton class="skeleton-count" />
                        } else {
                            <div class="summary-value">{ count_with_status(reports, *status) }</div>
                        }
                    </div>
                    <span class="summary-icon">{"📄"}</span>
                </div>
            </div>
        }
    });

    let list = if loading {
        html! {
            <div class="stack">
                { for (0..3).map(|_| html! {
                    <div class="card">
                        <div class="card-header"><Skeleton class="skeleton-line-md" /></div>
                        <div class="card-content stack-sm">
                            <Skeleton class="skeleton-line-full" />
                            <Skeleton class="skeleton-line-lg" />
                        </div>
                    </div>
                }) }
            </div>
        }
    } else if let (Some(err), None) = (&query.error, &query.data) {
        if err.is_unauthorized() {
            notice(
                "⚠️",
                "Authentication Required",
                "Please log in again to view your reports.".to_string(),
                html! {
                    <button type="button" class="btn btn-primary" onclick={go(CitizenRoute::Login)}>{"Go to Login"}</button>
                },
            )
        } else {
            let retry = query.refetch.reform(|_: MouseEvent| ());
            notice(
                "⚠️",
                "Failed to load reports",
                err.to_string(),
                html! { <button type="button" class="btn btn-primary" onclick={retry}>{"Try Again"}</button> },
            )
        }
    } else if reports.is_empty() {
        notice(
            "📄",
            "No Reports Yet",
            "You haven't submitted any reports yet. Start by reporting your first civic issue.".to_string(),
            html! {
                <button type="button" class="btn btn-primary" onclick={go(CitizenRoute::Report)}>
                    {"+ Report Your First Issue"}
                </button>
            },
        )
    } else {
        html! { <div class="stack">{ for reports.iter().map(report_entry) }</div> }
    };

    html! {
        <CitizenLayout>
            <div class="stack">
                <div class="row-between page-intro">
                    <div>
                        <button type="button" class="btn btn-ghost" onclick={go(CitizenRoute::Home)}>{"← Back to Home"}</button>
                        <h1 class="section-title">{"My Reports"}</h1>
                        <p class="text-muted">{"Track the status of all your submitted civic issue reports"}</p>
                    </div>
                    <button type="button" class="btn btn-primary" onclick={go(CitizenRoute::Report)}>{"+ Report New Issue"}</button>
                </div>

                <div class="summary-grid">{ for summary }</div>

                { list }
            </div>
        </CitizenLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn report(id: &str, status: ReportStatus, location: Option<Location>) -> Report {
        Report {
            id: id.into(),
            description: "Water leak".into(),
            status,
            category: None,
            submitted_date: "2024-03-02T09:15:00".into(),
            image_url: None,
            location,
            citizen_id: "4".into(),
        }
    }

    #[test]
    fn counts_reports_per_status() {
        let reports = vec![
            report("1", ReportStatus::Pending, None),
            report("2", ReportStatus::Resolved, None),
            report("3", ReportStatus::Pending, None),
        ];
        assert_eq!(count_with_status(&reports, ReportStatus::Pending), 2);
        assert_eq!(count_with_status(&reports, ReportStatus::InProgress), 0);
        assert_eq!(count_with_status(&reports, ReportStatus::Resolved), 1);
    }

    #[test]
    fn coordinates_use_four_decimals() {
        let placed = report("1", ReportStatus::Pending, Some(Location::new(28.474412, 77.504123)));
        assert_eq!(coordinates_label(&placed), "28.4744, 77.5041");
        let unplaced = report("2", ReportStatus::Pending, None);
        assert_eq!(coordinates_label(&unplaced), "Location not available");
    }
}
