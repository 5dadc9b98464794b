use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::components::form::bind;
use crate::components::{CitizenLayout, FieldError, Link};
use crate::context::use_portal;
use crate::models::Credentials;
use crate::router::{navigate, CitizenRoute, Route};
use crate::services::CitizenApi;
use crate::stores::Toast;
use crate::utils::validation::{validate_login, Field, ValidationErrors};

#[function_component(CitizenLogin)]
pub fn citizen_login() -> Html {
    let portal = use_portal::<CitizenApi>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let errors = use_state(ValidationErrors::new);
    let submitting = use_state(|| false);

    // a visit to the login page ends any previous session
    {
        let portal = portal.clone();
        use_effect_with((), move |_| {
            portal.session.clear();
            portal.queries.clear();
            || ()
        });
    }

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

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
                        portal.toasts.push(Toast::success("Login Successful").with_description("Welcome back!"));
                        navigate(CitizenRoute::Home.path());
                    }
                    Err(err) => {
                        let message = err.to_string();
                        let description = if message.is_empty() {
                            "Please check your credentials and try again.".to_string()
                        } else {
                            message
                        };
                        portal.toasts.push(Toast::error("Login Failed").with_description(description));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <CitizenLayout show_header={false}>
            <div class="auth-screen">
                <div class="card auth-card">
                    <div class="card-header text-center">
                        <div class="brand brand-centered">
                            <span class="brand-icon">{"📍"}</span>
                            <div>
                                <h1 class="brand-title">{"SEWASETU"}</h1>
                                <p class="brand-subtitle">{"Citizen Portal"}</p>
                            </div>
                        </div>
                        <h2 class="card-title">{"Sign In"}</h2>
                        <p class="card-description">{"Access your citizen portal to report and track civic issues"}</p>
                    </div>
                    <div class="card-content">
                        <form class="form-stack" {onsubmit} novalidate=true>
                            <div class="form-item">
                                <label for="email">{"Email Address"}</label>
                                <input id="email" type="email" class="input" placeholder="Enter your email"
                                    value={(*email).clone()} oninput={bind(&email)} />
                                <FieldError errors={(*errors).clone()} field={Field::Email} />
                            </div>
                            <div class="form-item">
                                <label for="password">{"Password"}</label>
                                <div class="input-with-action">
                                    <input id="password" class="input" placeholder="Enter your password"
                                        type={if *show_password { "text" } else { "password" }}
                                        value={(*password).clone()} oninput={bind(&password)} />
                                    <button type="button" class="btn btn-ghost btn-sm input-action" onclick={toggle_password}>
                                        { if *show_password { "🙈" } else { "👁" } }
                                    </button>
                                </div>
                                <FieldError errors={(*errors).clone()} field={Field::Password} />
                            </div>
                            <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                                { if *submitting { "Signing In..." } else { "Sign In" } }
                            </button>
                        </form>

                        <p class="auth-switch text-muted">
                            {"Don't have an account? "}
                            <Link to={CitizenRoute::Signup.path()} class={classes!("btn-link")}>{"Create Account"}</Link>
                        </p>
                    </div>
                </div>
            </div>
        </CitizenLayout>
    }
}
