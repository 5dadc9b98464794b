use std::rc::Rc;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use crate::config::CONFIG;
use crate::router::Redirect;
use crate::state::GuardState;
use crate::stores::SessionStore;

#[derive(Properties)]
pub struct RouteGuardProps {
    pub session: Rc<dyn SessionStore>,
    pub login_path: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

impl PartialEq for RouteGuardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.session) as *const u8 == Rc::as_ptr(&other.session) as *const u8
            && self.login_path == other.login_path
            && self.children == other.children
    }
}

/// Renders its children only once the session check has passed
#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let guard = use_state(|| GuardState::Checking);

    {
        let guard = guard.clone();
        let session = props.session.clone();
        use_effect_with((), move |_| {
            let timer = Timeout::new(CONFIG.ui_config.guard_delay_ms, move || {
                let next = GuardState::evaluate(session.as_ref());
                if next == GuardState::Redirecting {
                    log::info!("🔐 No session, redirecting to login");
                }
                guard.set(next);
            });
            // dropping the timer cancels a check that has not run yet
            move || drop(timer)
        });
    }

    match *guard {
        GuardState::Checking => html! {
            <div class="guard-checking">{"Checking authentication..."}</div>
        },
        GuardState::Authenticated => html! { <>{ props.children.clone() }</> },
        GuardState::Redirecting => html! { <Redirect to={props.login_path.clone()} /> },
    }
}
