use yew::prelude::*;
use crate::components::{RouteGuard, Toaster};
use crate::context::CitizenContext;
use crate::router::{use_route, CitizenRoute, Redirect, Route};
use crate::views::citizen::{CitizenLogin, Home, MyReports, ReportIssue, Signup};

/// Citizen portal root. My Reports stays reachable without a session and
/// explains itself; Home and the report form require one.
#[function_component(CitizenApp)]
pub fn citizen_app() -> Html {
    let portal = use_state(CitizenContext::browser);
    let route = use_route::<CitizenRoute>();

    let guarded = |page: Html| {
        html! {
            <RouteGuard key={route.path()} session={portal.session.clone()} login_path={CitizenRoute::Login.path()}>
                { page }
            </RouteGuard>
        }
    };

    let page = match route {
        CitizenRoute::Login => html! { <CitizenLogin /> },
        CitizenRoute::Signup => html! { <Signup /> },
        CitizenRoute::Home => guarded(html! { <Home /> }),
        CitizenRoute::Report => guarded(html! { <ReportIssue /> }),
        CitizenRoute::MyReports => html! { <MyReports /> },
        CitizenRoute::NotFound => html! { <Redirect to={CitizenRoute::Home.path()} /> },
    };

    html! {
        <ContextProvider<CitizenContext> context={(*portal).clone()}>
            { page }
            <Toaster store={portal.toasts.clone()} />
        </ContextProvider<CitizenContext>>
    }
}
