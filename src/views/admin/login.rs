// ============================================================================
// ADMIN LOGIN VIEW
// ============================================================================
// Visiting the page signs out whatever session was left behind.
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::components::form::bind;
use crate::components::FieldError;
use crate::config::CONFIG;
use crate::context::use_portal;
use crate::models::Credentials;
use crate::router::{navigate, AdminRoute, Route};
use crate::services::AdminApi;
use crate::stores::Toast;
use crate::utils::validation::{validate_login, Field, ValidationErrors};

#[function_component(AdminLogin)]
pub fn admin_login() -> Html {
    let portal = use_portal::<AdminApi>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let errors = use_state(ValidationErrors::new);
    let submitting = use_state(|| false);

    {
        let portal = portal.clone();
        use_effect_with((), move |_| {
            portal.session.clear();
            portal.queries.clear();
            log::debug!("🧹 Admin session cleared on login page");
            || ()
        });
    }

    let onsubmit = {
        let portal = portal.clone();
        let email = email.clone();
        let password = password.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            if let Err(invalid) = validate_login(&email, &password) {
                errors.set(invalid);
                return;
            }
            errors.set(ValidationErrors::new());
            submitting.set(true);

            let credentials = Credentials {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let portal = portal.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match portal.api.login(&credentials).await {
                    Ok(_) => {
                        portal.toasts.push(
                            Toast::success("Login successful")
                                .with_description("Welcome to SEWASETU Admin Portal"),
                        );
                        navigate(AdminRoute::Dashboard.path());
                    }
                    Err(err) => {
                        portal
                            .toasts
                            .push(Toast::error("Login Failed").with_description(err.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <div class="auth-column">
                <div class="auth-brand">
                    <img src="/favicon-32x32.png" alt="SEWASETU Logo" class="brand-logo-lg" />
                    <h1 class="brand-title-lg">{"SEWASETU"}</h1>
                    <p class="brand-subtitle-lg">{"Admin Portal"}</p>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Administrator Login"}</h2>
                        <p class="card-description">{"Enter your credentials to access the dashboard"}</p>
                    </div>
                    <form class="card-content form-stack" {onsubmit} novalidate=true>
                        <div class="form-item">
                            <label for="email">{"Email Address"}</label>
                            <input id="email" type="email" class="input" value={(*email).clone()} oninput={bind(&email)} />
                            <FieldError errors={(*errors).clone()} field={Field::Email} />
                        </div>
                        <div class="form-item">
                            <label for="password">{"Password"}</label>
                            <input id="password" type="password" class="input" value={(*password).clone()} oninput={bind(&password)} />
                            <FieldError errors={(*errors).clone()} field={Field::Password} />
                        </div>
                        <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                            { if *submitting { "Signing in..." } else { "Sign In" } }
                        </button>
                    </form>
                </div>

                if let Some(url) = CONFIG.citizen_portal_url.clone() {
                    <div class="card card-muted">
                        <div class="card-content text-center">
                            <p class="text-muted">{"Are you a citizen looking to report issues?"}</p>
                            <a class="btn btn-outline btn-block" href={url}>{"👥 Switch to Citizen Portal"}</a>
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}
