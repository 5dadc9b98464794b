// ============================================================================
// REPORTS VIEW - filters, report map, paginated table and the status drawer
// ============================================================================
// Every filter change goes back to page 1. Status updates invalidate all
// cached report pages, so the table refetches whatever page is showing.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::components::form::{input_value, select_value};
use crate::components::{AdminLayout, LoadError, MapMode, ReportMap, Skeleton, StatusBadge};
use crate::config::CONFIG;
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::maps::geolocation::request_current_position;
use crate::maps::MapMarker;
use crate::models::{Location, Report, ReportStatus, REPORT_CATEGORIES};
use crate::router::{AdminRoute, Route};
use crate::services::admin_api::DEPARTMENTS;
use crate::services::{AdminApi, AreaFilter, QueryKey, ReportFilter};
use crate::state::{apply_status_update, DrawerAction, StatusDrawer};
use crate::stores::Toast;
use crate::utils::{format_date, total_pages, DateStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
struct AreaInputs {
    enabled: bool,
    center_lat: f64,
    center_lon: f64,
    radius_km: f64,
}

impl AreaInputs {
    fn initial() -> Self {
        let map = &CONFIG.map_config;
        Self {
            enabled: false,
            center_lat: map.admin_center_lat,
            center_lon: map.admin_center_lng,
            radius_km: map.default_radius_km,
        }
    }

    fn filter(&self) -> Option<AreaFilter> {
        self.enabled.then_some(AreaFilter {
            center_lat: self.center_lat,
            center_lon: self.center_lon,
            radius_km: self.radius_km,
        })
    }
}

enum AreaAction {
    Recenter(Location),
    Toggle,
    Disable,
    Edit(fn(&mut AreaInputs, String), String),
}

impl Reducible for AreaInputs {
    type Action = AreaAction;

    fn reduce(self: Rc<Self>, action: AreaAction) -> Rc<Self> {
        let mut next = *self;
        match action {
            AreaAction::Recenter(location) => {
                next.center_lat = location.latitude;
                next.center_lon = location.longitude;
            }
            AreaAction::Toggle => next.enabled = !next.enabled,
            AreaAction::Disable => next.enabled = false,
            AreaAction::Edit(apply, raw) => apply(&mut next, raw),
        }
        Rc::new(next)
    }
}

/// Unparseable number inputs fall back instead of erroring
fn parse_number(raw: &str, fallback: f64) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(fallback)
}

#[function_component(Reports)]
pub fn reports() -> Html {
    let portal = use_portal::<AdminApi>();
    let per_page = CONFIG.ui_config.reports_per_page;

    let filter = use_state(ReportFilter::default);
    let area = use_reducer(AreaInputs::initial);
    let page = use_state(|| 1usize);
    let drawer = use_reducer(StatusDrawer::default);
    let user_location = use_state(|| None::<Location>);

    let departments = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(DEPARTMENTS), move || {
            let api = api.clone();
            async move { api.fetch_departments().await }
        })
    };

    let effective_filter = ReportFilter { area: area.filter(), ..(*filter).clone() };
    let reports = {
        let api = portal.api.clone();
        let key = effective_filter.cache_key(*page, per_page);
        let filter = effective_filter.clone();
        let page = *page;
        use_query(&portal.queries, key, move || {
            let api = api.clone();
            let filter = filter.clone();
            async move { api.fetch_reports(&filter, page, per_page).await }
        })
    };

    // Centre the area filter on the admin's position when it is available
    {
        let area = area.clone();
        let user_location = user_location.clone();
        let toasts = portal.toasts.clone();
        use_effect_with((), move |_| {
            request_current_position(
                move |lat, lng| {
                    let location = Location::new(lat, lng);
                    user_location.set(Some(location));
                    area.dispatch(AreaAction::Recenter(location));
                },
                move |err| {
                    log::warn!("⚠️ Could not get user location: {}", err);
                    toasts.push(
                        Toast::info("Using default location")
                            .with_description("Could not access your location. Using default center point."),
                    );
                },
            );
            || ()
        });
    }

    let update_filter = {
        let filter = filter.clone();
        let page = page.clone();
        move |apply: fn(&mut ReportFilter, String)| {
            let filter = filter.clone();
            let page = page.clone();
            Callback::from(move |e: Event| {
                let mut next = (*filter).clone();
                apply(&mut next, select_value(&e));
                filter.set(next);
                page.set(1);
            })
        }
    };
    let on_status = update_filter(|f, value| f.status = ReportStatus::parse(&value));
    let on_category = update_filter(|f, value| f.category = (value != "all").then_some(value));
    let on_department = update_filter(|f, value| f.department_id = value.parse().ok());

    let update_area = {
        let area = area.clone();
        let page = page.clone();
        move |apply: fn(&mut AreaInputs, String)| {
            let area = area.clone();
            let page = page.clone();
            Callback::from(move |e: InputEvent| {
                area.dispatch(AreaAction::Edit(apply, input_value(&e)));
                page.set(1);
            })
        }
    };
    let on_center_lat = update_area(|a, raw| a.center_lat = parse_number(&raw, 0.0));
    let on_center_lon = update_area(|a, raw| a.center_lon = parse_number(&raw, 0.0));
    let on_radius = update_area(|a, raw| {
        a.radius_km = Some(parse_number(&raw, 0.0)).filter(|r| *r > 0.0).unwrap_or(10.0)
    });
    let on_toggle_area = {
        let area = area.clone();
        let page = page.clone();
        Callback::from(move |_: Event| {
            area.dispatch(AreaAction::Toggle);
            page.set(1);
        })
    };

    let on_use_my_location = {
        let area = area.clone();
        let user_location = user_location.clone();
        let toasts = portal.toasts.clone();
        Callback::from(move |_: MouseEvent| match *user_location {
            Some(location) => {
                area.dispatch(AreaAction::Recenter(location));
                toasts.push(
                    Toast::success("Location updated")
                        .with_description("Using your current location as filter center"),
                );
            }
            None => {
                toasts.push(
                    Toast::error("Location unavailable")
                        .with_description("Could not access your current location"),
                );
            }
        })
    };

    let on_reset = {
        let filter = filter.clone();
        let area = area.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            filter.set(ReportFilter::default());
            area.dispatch(AreaAction::Disable);
            page.set(1);
        })
    };

    let open_report = {
        let drawer = drawer.clone();
        move |report: Report| {
            let drawer = drawer.clone();
            Callback::from(move |_: MouseEvent| drawer.dispatch(DrawerAction::Open(report.clone())))
        }
    };
    let close_drawer = {
        let drawer = drawer.clone();
        Callback::from(move |_: MouseEvent| drawer.dispatch(DrawerAction::Close))
    };
    let choose_status = {
        let drawer = drawer.clone();
        let portal = portal.clone();
        move |status: ReportStatus| {
            let drawer = drawer.clone();
            let portal = portal.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = (*drawer).clone().begin(status) else {
                    return;
                };
                drawer.dispatch(DrawerAction::Begin(status));

                let drawer = drawer.clone();
                let portal = portal.clone();
                spawn_local(async move {
                    let outcome = apply_status_update(&portal.api, &portal.queries, &id, status).await;
                    if let Ok(updated) = &outcome {
                        portal.toasts.push(
                            Toast::success(format!("Report {} updated", updated.id))
                                .with_description(format!("Status changed to {}.", updated.status)),
                        );
                    }
                    drawer.dispatch(DrawerAction::Finish { id, saved: outcome.is_ok() });
                });
            })
        }
    };

    let loading = reports.is_initial_load();
    let total_count = reports.data.as_ref().map_or(0, |d| d.total_count);
    let pages = reports.data.as_ref().map_or(1, |d| total_pages(d.total_count, per_page));
    let rows: Vec<Report> = reports.data.as_ref().map(|d| d.reports.clone()).unwrap_or_default();

    let on_previous = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(page.saturating_sub(1).max(1)))
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set((*page + 1).min(pages)))
    };

    let map = &CONFIG.map_config;
    let status_value = filter.status.map_or("all", |s| s.backend_value());
    let category_value = filter.category.clone().unwrap_or_else(|| "all".to_string());
    let department_value = filter.department_id.map_or_else(|| "all".to_string(), |id| id.to_string());

    html! {
        <AdminLayout title="Reports Management">
            <div class="stack">
                <div class="card">
                    <div class="card-header">
                        <h3 class="card-title">{"Report Locations"}</h3>
                    </div>
                    <div class="card-content">
                        if loading {
                            <Skeleton class="skeleton-map" />
                        } else {
                            <ReportMap
                                mode={MapMode::Markers(MapMarker::from_reports(&rows))}
                                center={Location::new(map.admin_center_lat, map.admin_center_lng)}
                                zoom={map.overview_zoom}
                                scroll_zoom=true
                            />
                        }
                    </div>
                </div>

                <div class="card">
                    <div class="card-header row-between">
                        <h3 class="card-title">{"Filter Reports"}</h3>
                        <button type="button" class="btn btn-outline" onclick={on_reset}>{"Reset Filters"}</button>
                    </div>
                    <div class="card-content stack-sm">
                        <div class="filter-row">
                            <select class="select" onchange={on_status}>
                                <option value="all" selected={status_value == "all"}>{"All Statuses"}</option>
                                { for ReportStatus::ALL.iter().map(|status| html! {
                                    <option value={status.backend_value()} selected={status_value == status.backend_value()}>
                                        { status.label() }
                                    </option>
                                }) }
                            </select>

                            <select class="select" onchange={on_category}>
                                <option value="all" selected={category_value == "all"}>{"All Categories"}</option>
                                { for REPORT_CATEGORIES.iter().map(|category| html! {
                                    <option value={*category} selected={category_value == *category}>{ *category }</option>
                                }) }
                            </select>

                            <select class="select" onchange={on_department}>
                                <option value="all" selected={department_value == "all"}>{"All Departments"}</option>
                                { for departments.data.iter().flat_map(|list| list.iter()).map(|dept| {
                                    let value = dept.id.to_string();
                                    let selected = department_value == value;
                                    html! {
                                        <option {selected} {value}>{ &dept.name }</option>
                                    }
                                }) }
                            </select>
                        </div>

                        <div class="area-filter">
                            <label class="checkbox-row" for="location-filter">
                                <input id="location-filter" type="checkbox" checked={area.enabled} onchange={on_toggle_area} />
                                <span>{"Enable Location Filtering"}</span>
                            </label>

                            if area.enabled {
                                <div class="area-grid">
                                    <div class="form-item">
                                        <label for="center-lat">{"Center Latitude"}</label>
                                        <input id="center-lat" class="input" type="number" step="any" placeholder="28.6139"
                                            value={area.center_lat.to_string()} oninput={on_center_lat} />
                                    </div>
                                    <div class="form-item">
                                        <label for="center-lon">{"Center Longitude"}</label>
                                        <input id="center-lon" class="input" type="number" step="any" placeholder="77.2090"
                                            value={area.center_lon.to_string()} oninput={on_center_lon} />
                                    </div>
                                    <div class="form-item">
                                        <label for="radius">{"Radius (km)"}</label>
                                        <input id="radius" class="input" type="number" min="0.1" step="0.1" placeholder="10"
                                            value={area.radius_km.to_string()} oninput={on_radius} />
                                    </div>
                                    <div class="area-actions">
                                        <button type="button" class="btn btn-outline" onclick={on_use_my_location}
                                            disabled={user_location.is_none()}>
                                            {"🧭 Use My Location"}
                                        </button>
                                        <span class="text-muted text-sm">
                                            { format!("📍 Showing reports within {}km of center point", area.radius_km) }
                                        </span>
                                    </div>
                                </div>
                            }
                        </div>
                    </div>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h3 class="card-title">{ format!("Citizen Reports ({})", total_count) }</h3>
                    </div>
                    <div class="card-content">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>{"Report ID"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Submitted On"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                if loading {
                                    { for (0..per_page).map(|_| html! {
                                        <tr>
                                            <td><Skeleton class="skeleton-cell-sm" /></td>
                                            <td><Skeleton class="skeleton-cell-md" /></td>
                                            <td><Skeleton class="skeleton-pill" /></td>
                                            <td><Skeleton class="skeleton-cell-md" /></td>
                                            <td><Skeleton class="skeleton-button" /></td>
                                        </tr>
                                    }) }
                                } else if let (Some(err), None) = (&reports.error, &reports.data) {
                                    <tr>
                                        <td colspan="5">
                                            <LoadError
                                                error={err.clone()}
                                                title="Failed to load reports."
                                                on_retry={reports.refetch.clone()}
                                                login_path={AdminRoute::Login.path()}
                                            />
                                        </td>
                                    </tr>
                                } else {
                                    { for rows.iter().map(|report| html! {
                                        <tr key={report.id.clone()}>
                                            <td class="font-medium">{ &report.id }</td>
                                            <td>{ report.category_label() }</td>
                                            <td><StatusBadge status={report.status} /></td>
                                            <td>{ format_date(&report.submitted_date, DateStyle::Table) }</td>
                                            <td>
                                                <button type="button" class="btn btn-outline btn-sm" onclick={open_report(report.clone())}>
                                                    {"👁 View Details"}
                                                </button>
                                            </td>
                                        </tr>
                                    }) }
                                }
                            </tbody>
                        </table>
                    </div>
                </div>

                <nav class="pagination">
                    <button type="button" class="btn btn-ghost" onclick={on_previous} disabled={*page == 1 || reports.loading}>
                        {"‹ Previous"}
                    </button>
                    <span class="pagination-label">{ format!("Page {} of {}", *page, pages) }</span>
                    <button type="button" class="btn btn-ghost" onclick={on_next} disabled={*page >= pages || reports.loading}>
                        {"Next ›"}
                    </button>
                </nav>
            </div>

            if let Some(report) = drawer.report() {
                <div class="drawer-backdrop" onclick={close_drawer.clone()}></div>
                <div class="drawer" role="dialog">
                    <div class="drawer-body">
                        <div class="drawer-header">
                            <h2 class="drawer-title">{ format!("{}: {}", report.id, report.category_label()) }</h2>
                            <p class="drawer-description">{ &report.description }</p>
                        </div>
                        <div class="drawer-section">
                            <div class="font-medium">{"Update Status"}</div>
                            <div class="button-row">
                                { for ReportStatus::ALL.iter().map(|status| {
                                    let class = classes!("btn", if report.status == *status { "btn-primary" } else { "btn-outline" });
                                    let label = if drawer.pending() == Some(*status) { "Updating..." } else { status.label() };
                                    html! {
                                        <button type="button" {class} disabled={!drawer.can_select(*status)}
                                            onclick={choose_status(*status)}>
                                            { label }
                                        </button>
                                    }
                                }) }
                            </div>
                        </div>
                        <div class="drawer-footer">
                            <button type="button" class="btn btn-outline" onclick={close_drawer}>{"Close"}</button>
                        </div>
                    </div>
                </div>
            }
        </AdminLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_inputs_fall_back_when_unparseable() {
        assert_eq!(parse_number("28.5", 0.0), 28.5);
        assert_eq!(parse_number(" 77.2 ", 0.0), 77.2);
        assert_eq!(parse_number("", 10.0), 10.0);
        assert_eq!(parse_number("abc", 0.0), 0.0);
        assert_eq!(parse_number("NaN", 10.0), 10.0);
    }

    #[test]
    fn area_filter_only_applies_when_enabled() {
        let mut inputs = AreaInputs {
            enabled: false,
            center_lat: 28.6,
            center_lon: 77.2,
            radius_km: 5.0,
        };
        assert_eq!(inputs.filter(), None);

        inputs.enabled = true;
        assert_eq!(
            inputs.filter(),
            Some(AreaFilter { center_lat: 28.6, center_lon: 77.2, radius_km: 5.0 })
        );
    }

    #[test]
    fn recentering_keeps_the_toggle_made_meanwhile() {
        let area = Rc::new(AreaInputs::initial());
        let enabled = area.reduce(AreaAction::Toggle);
        let moved = enabled.reduce(AreaAction::Recenter(Location::new(28.47, 77.5)));
        assert!(moved.enabled);
        assert_eq!((moved.center_lat, moved.center_lon), (28.47, 77.5));

        let reset = moved.reduce(AreaAction::Disable);
        assert_eq!(reset.filter(), None);
    }
}
