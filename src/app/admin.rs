// ============================================================================
// ADMIN APP - portal context, toasts and the route switch
// ============================================================================

use yew::prelude::*;
use crate::components::{RouteGuard, Toaster};
use crate::context::AdminContext;
use crate::router::{use_route, AdminRoute, Route};
use crate::views::admin::{AdminLogin, Analytics, Dashboard, Departments, NotFound, Reports};

#[function_component(AdminApp)]
pub fn admin_app() -> Html {
    let portal = use_state(AdminContext::browser);
    let route = use_route::<AdminRoute>();

    // keyed by route so the session is re-checked on every navigation
    let guarded = |page: Html| {
        html! {
            <RouteGuard key={route.path()} session={portal.session.clone()} login_path={AdminRoute::Login.path()}>
                { page }
            </RouteGuard>
        }
    };

    let page = match route {
        AdminRoute::Login => html! { <AdminLogin /> },
        AdminRoute::Dashboard => guarded(html! { <Dashboard /> }),
        AdminRoute::Reports => guarded(html! { <Reports /> }),
        AdminRoute::Analytics => guarded(html! { <Analytics /> }),
        AdminRoute::Departments => guarded(html! { <Departments /> }),
        AdminRoute::NotFound => html! { <NotFound /> },
    };

    html! {
        <ContextProvider<AdminContext> context={(*portal).clone()}>
            { page }
            <Toaster store={portal.toasts.clone()} />
        </ContextProvider<AdminContext>>
    }
}
