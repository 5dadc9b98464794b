// ============================================================================
// ANALYTICS VIEW - category, status, monthly and resolution charts as bars
// ============================================================================

use yew::prelude::*;
use crate::components::{AdminLayout, LoadError, Skeleton};
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::models::AnalyticsData;
use crate::router::{AdminRoute, Route};
use crate::services::admin_api::ANALYTICS;
use crate::services::{AdminApi, QueryKey};

/// Rounded percentage of `value` in `total`
fn share(value: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    ((value / total) * 100.0).round().clamp(0.0, 100.0) as u32
}

struct Bar {
    label: String,
    value: f64,
    display: String,
    color: Option<&'static str>,
}

/// Horizontal bars scaled against the largest value
fn bar_chart(bars: Vec<Bar>) -> Html {
    let max = bars.iter().map(|bar| bar.value).fold(0.0_f64, f64::max);
    html! {
        <div class="bar-chart">
            { for bars.into_iter().map(|bar| {
                let mut style = format!("width: {}%;", share(bar.value, max));
                if let Some(color) = bar.color {
                    style.push_str(&format!(" background: {};", color));
                }
                html! {
                    <div class="bar-row" key={bar.label.clone()}>
                        <span class="bar-label">{ &bar.label }</span>
                        <div class="bar-track"><div class="bar-fill" {style}></div></div>
                        <span class="bar-value">{ bar.display }</span>
                    </div>
                }
            }) }
        </div>
    }
}

fn category_chart(data: &AnalyticsData) -> Html {
    let total: u32 = data.category_distribution.iter().map(|slice| slice.value).sum();
    bar_chart(
        data.category_distribution
            .iter()
            .map(|slice| Bar {
                label: slice.name.clone(),
                value: slice.value as f64,
                display: format!("{} ({}%)", slice.value, share(slice.value as f64, total as f64)),
                color: Some(slice.color),
            })
            .collect(),
    )
}

fn status_chart(data: &AnalyticsData) -> Html {
    bar_chart(
        data.status_distribution
            .iter()
            .map(|(status, count)| Bar {
                label: status.label().to_string(),
                value: *count as f64,
                display: count.to_string(),
                color: None,
            })
            .collect(),
    )
}

fn monthly_chart(data: &AnalyticsData) -> Html {
    bar_chart(
        data.monthly_reports
            .iter()
            .map(|month| Bar {
                label: month.month.to_string(),
                value: month.total as f64,
                display: month.total.to_string(),
                color: None,
            })
            .collect(),
    )
}

fn resolution_chart(data: &AnalyticsData) -> Html {
    bar_chart(
        data.resolution_time_trend
            .iter()
            .map(|point| Bar {
                label: point.date.to_string(),
                value: point.days,
                display: format!("{:.1} days", point.days),
                color: None,
            })
            .collect(),
    )
}

fn chart_card(title: &'static str, data: Option<&AnalyticsData>, render: fn(&AnalyticsData) -> Html) -> Html {
    html! {
        <div class="card">
            <div class="card-header"><h3 class="card-title">{ title }</h3></div>
            <div class="card-content">
                { match data {
                    Some(data) => render(data),
                    None => html! { <Skeleton class="skeleton-chart" /> },
                } }
            </div>
        </div>
    }
}

#[function_component(Analytics)]
pub fn analytics() -> Html {
    let portal = use_portal::<AdminApi>();
    let query = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(ANALYTICS), move || {
            let api = api.clone();
            async move { api.fetch_analytics().await }
        })
    };

    if let (Some(err), None) = (&query.error, &query.data) {
        return html! {
            <AdminLayout title="Analytics">
                <LoadError
                    error={err.clone()}
                    title="Error loading analytics."
                    on_retry={query.refetch.clone()}
                    login_path={AdminRoute::Login.path()}
                />
            </AdminLayout>
        };
    }

    let data = query.data.as_deref();
    html! {
        <AdminLayout title="Analytics & Reports">
            <div class="stack">
                <div class="two-column">
                    { chart_card("Reports by Category", data, category_chart) }
                    { chart_card("Reports by Status", data, status_chart) }
                </div>
                { chart_card("Monthly New Reports", data, monthly_chart) }
                { chart_card("Resolution Time Trend (Avg. Days)", data, resolution_chart) }
            </div>
        </AdminLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_rounds_and_guards_empty_totals() {
        assert_eq!(share(1.0, 3.0), 33);
        assert_eq!(share(2.0, 3.0), 67);
        assert_eq!(share(5.0, 0.0), 0);
        assert_eq!(share(4.2, 4.2), 100);
    }
}
