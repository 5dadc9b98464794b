// ============================================================================
// DASHBOARD VIEW - KPI cards, recent reports, department performance
// ============================================================================

use yew::prelude::*;
use crate::components::{AdminLayout, LoadError, Skeleton, StatusBadge};
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::models::DashboardData;
use crate::router::{AdminRoute, Route};
use crate::services::admin_api::DASHBOARD;
use crate::services::{AdminApi, QueryKey};
use crate::utils::format_count;

#[derive(Properties, PartialEq)]
struct KpiCardProps {
    title: AttrValue,
    icon: AttrValue,
    accent: AttrValue,
    value: AttrValue,
    #[prop_or_default]
    note: Option<AttrValue>,
}

#[function_component(KpiCard)]
fn kpi_card(props: &KpiCardProps) -> Html {
    html! {
        <div class="card kpi-card">
            <div class="card-header kpi-header">
                <h3 class="kpi-title">{ &props.title }</h3>
                <span class={classes!("kpi-icon", props.accent.to_string())}>{ &props.icon }</span>
            </div>
            <div class="card-content">
                <div class="kpi-value">{ &props.value }</div>
                if let Some(note) = &props.note {
                    <p class="kpi-note">{ note }</p>
                }
            </div>
        </div>
    }
}

fn kpi_skeleton() -> Html {
    html! {
        <div class="card kpi-card">
            <div class="card-header kpi-header">
                <Skeleton class="skeleton-line-md" />
                <Skeleton class="skeleton-dot" />
            </div>
            <div class="card-content">
                <Skeleton class="skeleton-value" />
                <Skeleton class="skeleton-line-lg" />
            </div>
        </div>
    }
}

fn kpi_cards(data: &DashboardData) -> Html {
    let kpis = &data.kpis;
    html! {
        <>
            <KpiCard title="Total Reports" icon="📄" accent="kpi-primary"
                value={format_count(kpis.total_reports)} />
            <KpiCard title="Reports Resolved" icon="✅" accent="kpi-success"
                value={format_count(kpis.reports_resolved)}
                note={format!("{}% resolution rate", data.resolution_rate())} />
            <KpiCard title="Avg Resolution Time" icon="⏱️" accent="kpi-secondary"
                value={kpis.avg_resolution_time.clone()} />
            <KpiCard title="Active Departments" icon="🏢" accent="kpi-warning"
                value={kpis.active_departments.to_string()} />
        </>
    }
}

fn recent_reports(data: &DashboardData) -> Html {
    html! {
        { for data.recent_reports.iter().map(|report| html! {
            <div key={report.id.clone()} class="recent-row">
                <div>
                    <p class="recent-issue">{ &report.issue }</p>
                    <p class="recent-meta">{ format!("{} • {}", report.id, report.time) }</p>
                </div>
                <StatusBadge status={report.status()} />
            </div>
        }) }
    }
}

fn department_performance(data: &DashboardData) -> Html {
    html! {
        { for data.department_performance.iter().map(|dept| {
            let width = format!("width: {}%", dept.rate.clamp(0.0, 100.0));
            html! {
                <div key={dept.name.clone()} class="performance-row">
                    <div class="performance-labels">
                        <span class="performance-name">{ &dept.name }</span>
                        <span class="text-muted">{ format!("{}%", dept.rate) }</span>
                    </div>
                    <div class="progress">
                        <div class="progress-bar" style={width}></div>
                    </div>
                </div>
            }
        }) }
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let portal = use_portal::<AdminApi>();
    let query = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(DASHBOARD), move || {
            let api = api.clone();
            async move { api.fetch_dashboard().await }
        })
    };

    if let (Some(err), None) = (&query.error, &query.data) {
        return html! {
            <AdminLayout title="Dashboard">
                <LoadError
                    error={err.clone()}
                    title="Failed to Load Dashboard"
                    message="Failed to load dashboard data. Please try again later."
                    on_retry={query.refetch.clone()}
                    login_path={AdminRoute::Login.path()}
                />
            </AdminLayout>
        };
    }

    let data = query.data.clone();
    html! {
        <AdminLayout title="Dashboard">
            <div class="stack">
                <div class="kpi-grid">
                    { match &data {
                        Some(data) => kpi_cards(data),
                        None => html! { for (0..4).map(|_| kpi_skeleton()) },
                    } }
                </div>

                <div class="two-column">
                    <div class="card">
                        <div class="card-header">
                            <h3 class="card-title">{"Recent Reports"}</h3>
                        </div>
                        <div class="card-content stack-sm">
                            { match &data {
                                Some(data) => recent_reports(data),
                                None => html! { for (0..4).map(|_| html! { <Skeleton class="skeleton-row" /> }) },
                            } }
                        </div>
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <h3 class="card-title">{"Department Performance"}</h3>
                        </div>
                        <div class="card-content stack-sm">
                            { match &data {
                                Some(data) => department_performance(data),
                                None => html! { for (0..4).map(|_| html! { <Skeleton class="skeleton-bar" /> }) },
                            } }
                        </div>
                    </div>
                </div>
            </div>
        </AdminLayout>
    }
}
