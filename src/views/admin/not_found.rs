use yew::prelude::*;
use crate::components::Link;
use crate::router::{use_current_path, AdminRoute, Route};

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let path = use_current_path();

    {
        let path = path.clone();
        use_effect_with(path, |path| {
            log::error!("❌ 404: no admin page at {}", path);
            || ()
        });
    }

    html! {
        <div class="auth-screen">
            <div class="card not-found text-center">
                <div class="card-header">
                    <div class="not-found-icon">{"🛡️"}</div>
                    <h1 class="not-found-code">{"404"}</h1>
                    <h2 class="card-title">{"Page Not Found"}</h2>
                </div>
                <div class="card-content form-stack">
                    <p class="text-muted">{"The page you're looking for doesn't exist or has been moved."}</p>
                    <p class="text-muted text-sm">
                        {"Requested path: "}<code class="code-chip">{ path }</code>
                    </p>
                    <Link to={AdminRoute::Dashboard.path()} class={classes!("btn", "btn-primary", "btn-block")}>
                        {"Return to Dashboard"}
                    </Link>
                    <Link to={AdminRoute::Login.path()} class={classes!("btn", "btn-ghost", "btn-block")}>
                        {"Go to Login"}
                    </Link>
                </div>
            </div>
        </div>
    }
}
