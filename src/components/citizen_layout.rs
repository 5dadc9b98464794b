use yew::prelude::*;
use crate::context::use_portal;
use crate::router::{navigate, use_current_path, CitizenRoute, Route};
use crate::services::CitizenApi;

#[derive(Properties, PartialEq)]
pub struct CitizenLayoutProps {
    #[prop_or(true)]
    pub show_header: bool,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(CitizenLayout)]
pub fn citizen_layout(props: &CitizenLayoutProps) -> Html {
    let portal = use_portal::<CitizenApi>();
    let current = CitizenRoute::recognize(&use_current_path());
    let signed_in_area = !matches!(current, CitizenRoute::Login | CitizenRoute::Signup);

    let go = |route: CitizenRoute| Callback::from(move |_: MouseEvent| navigate(route.path()));
    let on_logout = {
        let portal = portal.clone();
        Callback::from(move |_: MouseEvent| {
            let next = portal.api.sign_out(&portal.queries);
            navigate(next.path());
        })
    };
    let nav_class = |route: CitizenRoute| {
        classes!("btn", if current == route { "btn-primary" } else { "btn-ghost" })
    };

    html! {
        <div class="citizen-layout">
            if props.show_header {
                <header class="site-header">
                    <div class="container header-row">
                        <div class="brand">
                            <img src="/favicon-32x32.png" alt="SEWASETU Logo" class="brand-logo" />
                            <div>
                                <h1 class="brand-title">{"SEWASETU"}</h1>
                                <p class="brand-subtitle">{"Citizen Portal"}</p>
                            </div>
                        </div>
                        if signed_in_area {
                            <nav class="site-nav">
                                <button type="button" class={nav_class(CitizenRoute::Home)} onclick={go(CitizenRoute::Home)}>
                                    {"📍 Home"}
                                </button>
                                <button type="button" class={nav_class(CitizenRoute::MyReports)} onclick={go(CitizenRoute::MyReports)}>
                                    {"📄 My Reports"}
                                </button>
                                <button type="button" class="btn btn-ghost text-destructive" onclick={on_logout}>
                                    {"Logout"}
                                </button>
                            </nav>
                        }
                    </div>
                </header>
            }
            <main class="container site-main">{ props.children.clone() }</main>
        </div>
    }
}
