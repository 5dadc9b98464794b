use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::components::form::bind;
use crate::components::{CitizenLayout, FieldError, Link};
use crate::context::use_portal;
use crate::models::RegisterRequest;
use crate::router::{navigate, CitizenRoute, Route};
use crate::services::CitizenApi;
use crate::stores::Toast;
use crate::utils::validation::{validate_signup, Field, ValidationErrors};

#[function_component(Signup)]
pub fn signup() -> Html {
    let portal = use_portal::<CitizenApi>();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let errors = use_state(ValidationErrors::new);
    let submitting = use_state(|| false);

    let onsubmit = {
        let portal = portal.clone();
        let (name, email, password, confirm) = (name.clone(), email.clone(), password.clone(), confirm.clone());
        let errors = errors.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            if let Err(invalid) = validate_signup(&name, &email, &password, &confirm) {
                errors.set(invalid);
                return;
            }
            errors.set(ValidationErrors::new());
            submitting.set(true);

            let request = RegisterRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let portal = portal.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match portal.api.register(&request).await {
                    Ok(_) => {
                        portal.toasts.push(
                            Toast::success("Account Created").with_description("You can now sign in with your new account."),
                        );
                        navigate(CitizenRoute::Login.path());
                    }
                    Err(err) => {
                        portal.toasts.push(Toast::error("Registration Failed").with_description(err.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let field = |id: &'static str, label: &'static str, kind: &'static str, state: &UseStateHandle<String>, which: Field| {
        html! {
            <div class="form-item">
                <label for={id}>{ label }</label>
                <input {id} type={kind} class="input" value={(**state).clone()} oninput={bind(state)} />
                <FieldError errors={(*errors).clone()} field={which} />
            </div>
        }
    };

    html! {
        <CitizenLayout show_header={false}>
            <div class="auth-screen">
                <div class="card auth-card">
                    <div class="card-header text-center">
                        <h2 class="card-title">{"Create Account"}</h2>
                        <p class="card-description">{"Join your city's portal to report and follow civic issues"}</p>
                    </div>
                    <div class="card-content">
                        <form class="form-stack" {onsubmit} novalidate=true>
                            { field("name", "Full Name", "text", &name, Field::Name) }
                            { field("email", "Email Address", "email", &email, Field::Email) }
                            { field("password", "Password", "password", &password, Field::Password) }
                            { field("confirm-password", "Confirm Password", "password", &confirm, Field::ConfirmPassword) }
                            <button type="submit" class="btn btn-primary btn-block" disabled={*submitting}>
                                { if *submitting { "Creating Account..." } else { "Create Account" } }
                            </button>
                        </form>
                        <p class="auth-switch text-muted">
                            {"Already have an account? "}
                            <Link to={CitizenRoute::Login.path()} class={classes!("btn-link")}>{"Sign In"}</Link>
                        </p>
                    </div>
                </div>
            </div>
        </CitizenLayout>
    }
}
