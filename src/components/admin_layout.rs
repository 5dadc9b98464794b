// ============================================================================
// ADMIN LAYOUT - sidebar navigation, header with logout, page body
// ============================================================================

use yew::prelude::*;
use crate::context::{use_portal, AdminContext};
use crate::router::{navigate, use_current_path, AdminRoute, Route};
use crate::services::AdminApi;
use crate::stores::Toast;
use super::link::Link;

const NAVIGATION: [(&str, AdminRoute); 4] = [
    ("Dashboard", AdminRoute::Dashboard),
    ("Reports", AdminRoute::Reports),
    ("Analytics", AdminRoute::Analytics),
    ("Departments", AdminRoute::Departments),
];

/// Best-effort server logout, then unconditional local cleanup and a redirect
pub fn logout_callback(portal: &AdminContext) -> Callback<()> {
    let portal = portal.clone();
    Callback::from(move |_| {
        let portal = portal.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let next = portal.api.sign_out(&portal.queries).await;
            portal.toasts.push(
                Toast::success("Logged out successfully")
                    .with_description("You have been logged out of the admin portal"),
            );
            navigate(next.path());
        });
    })
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub on_logout: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let collapsed = use_state(|| false);
    let path = use_current_path();
    let current = AdminRoute::recognize(&path);

    let toggle = {
        let collapsed = collapsed.clone();
        Callback::from(move |_: MouseEvent| collapsed.set(!*collapsed))
    };

    html! {
        <aside class={classes!("sidebar", collapsed.then_some("sidebar-collapsed"))}>
            <div class="sidebar-brand">
                if !*collapsed {
                    <div class="brand">
                        <span class="brand-icon">{"🛡️"}</span>
                        <div>
                            <h1 class="brand-title">{"SEWASETU"}</h1>
                            <p class="brand-subtitle">{"Admin Portal"}</p>
                        </div>
                    </div>
                }
                <button type="button" class="btn-icon" onclick={toggle}>
                    { if *collapsed { "›" } else { "‹" } }
                    <span class="sr-only">{"Toggle sidebar"}</span>
                </button>
            </div>

            <nav class="sidebar-nav">
                { for NAVIGATION.iter().map(|(name, route)| {
                    let class = classes!("nav-link", (current == *route).then_some("nav-link-active"));
                    html! {
                        <Link to={route.path()} {class}>
                            if !*collapsed { <span>{ *name }</span> } else { <span>{ &name[..1] }</span> }
                        </Link>
                    }
                }) }
            </nav>

            <div class="sidebar-footer">
                <button type="button" class="btn btn-ghost" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                    if !*collapsed { <span>{"Logout"}</span> } else { <span>{"⎋"}</span> }
                </button>
            </div>
        </aside>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub title: AttrValue,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    html! {
        <header class="nav-header">
            <div>
                <h1 class="page-title">{ &props.title }</h1>
                <p class="page-subtitle">{"City administration dashboard"}</p>
            </div>
            <div class="user-menu">
                <button type="button" class="btn btn-ghost" onclick={toggle_menu}>
                    <span class="avatar">{"👤"}</span>
                    <span class="user-details">
                        <span class="user-name">{"Admin User"}</span>
                        <span class="user-email">{"admin@sewasetu.gov"}</span>
                    </span>
                </button>
                if *menu_open {
                    <div class="dropdown">
                        <div class="dropdown-label">{"Admin Account"}</div>
                        <button type="button" class="dropdown-item text-destructive" onclick={props.on_logout.reform(|_: MouseEvent| ())}>
                            {"Logout"}
                        </button>
                    </div>
                }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AdminLayout)]
pub fn admin_layout(props: &AdminLayoutProps) -> Html {
    let portal = use_portal::<AdminApi>();
    let on_logout = use_memo((), move |_| logout_callback(&portal));

    html! {
        <div class="dashboard-layout">
            <Sidebar on_logout={(*on_logout).clone()} />
            <div class="dashboard-main">
                <Header title={props.title.clone()} on_logout={(*on_logout).clone()} />
                <main class="dashboard-content">
                    <div class="content-width">{ props.children.clone() }</div>
                </main>
            </div>
        </div>
    }
}
