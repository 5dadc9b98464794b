// ============================================================================
// ROUTER - path <-> route mapping over the History API
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// A page of one portal
pub trait Route: Copy + PartialEq + 'static {
    fn recognize(path: &str) -> Self;

    fn path(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Login,
    Dashboard,
    Reports,
    Analytics,
    Departments,
    NotFound,
}

impl Route for AdminRoute {
    fn recognize(path: &str) -> Self {
        match normalize(path) {
            "/login" => AdminRoute::Login,
            "/" => AdminRoute::Dashboard,
            "/reports" => AdminRoute::Reports,
            "/analytics" => AdminRoute::Analytics,
            "/departments" => AdminRoute::Departments,
            _ => AdminRoute::NotFound,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            AdminRoute::Login => "/login",
            AdminRoute::Dashboard => "/",
            AdminRoute::Reports => "/reports",
            AdminRoute::Analytics => "/analytics",
            AdminRoute::Departments => "/departments",
            AdminRoute::NotFound => "/404",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitizenRoute {
    Login,
    Signup,
    Home,
    MyReports,
    Report,
    NotFound,
}

impl Route for CitizenRoute {
    fn recognize(path: &str) -> Self {
        match normalize(path) {
            "/login" => CitizenRoute::Login,
            "/signup" => CitizenRoute::Signup,
            "/" | "/home" => CitizenRoute::Home,
            "/my-reports" => CitizenRoute::MyReports,
            "/report" => CitizenRoute::Report,
            _ => CitizenRoute::NotFound,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            CitizenRoute::Login => "/login",
            CitizenRoute::Signup => "/signup",
            CitizenRoute::Home => "/home",
            CitizenRoute::MyReports => "/my-reports",
            CitizenRoute::Report => "/report",
            CitizenRoute::NotFound => "/404",
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Pushes a history entry and lets every `use_current_path` know
pub fn navigate(path: &str) {
    change_location(path, false);
}

/// Same as `navigate` but replaces the current entry
pub fn replace(path: &str) {
    change_location(path, true);
}

fn change_location(path: &str, replace: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        log::warn!("⚠️ History API unavailable, cannot open {}", path);
        return;
    };

    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if result.is_err() {
        log::error!("❌ Navigation to {} failed", path);
        return;
    }

    if let Ok(event) = web_sys::Event::new("popstate") {
        let _ = window.dispatch_event(&event);
    }
}

/// Current `location.pathname`, updated on back/forward and on `navigate`
#[hook]
pub fn use_current_path() -> String {
    let path = use_state(current_path);

    {
        let path = path.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                path.set(current_path());
            }) as Box<dyn FnMut(web_sys::Event)>);

            let window = web_sys::window();
            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
                }
                drop(listener);
            }
        });
    }

    (*path).clone()
}

#[hook]
pub fn use_route<R: Route>() -> R {
    R::recognize(&use_current_path())
}

#[derive(Properties, PartialEq)]
pub struct RedirectProps {
    pub to: AttrValue,
}

/// Replaces the current history entry with `to` once mounted
#[function_component(Redirect)]
pub fn redirect(props: &RedirectProps) -> Html {
    let to = props.to.clone();
    use_effect_with(to, |to| {
        replace(to);
        || ()
    });
    html! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_paths_round_trip() {
        for route in [
            AdminRoute::Login,
            AdminRoute::Dashboard,
            AdminRoute::Reports,
            AdminRoute::Analytics,
            AdminRoute::Departments,
        ] {
            assert_eq!(AdminRoute::recognize(route.path()), route);
        }
        assert_eq!(AdminRoute::recognize("/reports/"), AdminRoute::Reports);
        assert_eq!(AdminRoute::recognize("/reports?page=2"), AdminRoute::Reports);
        assert_eq!(AdminRoute::recognize("/settings"), AdminRoute::NotFound);
    }

    #[test]
    fn citizen_root_is_home() {
        assert_eq!(CitizenRoute::recognize("/"), CitizenRoute::Home);
        assert_eq!(CitizenRoute::recognize(""), CitizenRoute::Home);
        assert_eq!(CitizenRoute::recognize("/home"), CitizenRoute::Home);
        assert_eq!(CitizenRoute::recognize("/my-reports"), CitizenRoute::MyReports);
        assert_eq!(CitizenRoute::recognize("/dashboard"), CitizenRoute::NotFound);
    }
}
