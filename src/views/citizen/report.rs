// ============================================================================
// REPORT VIEW - citizen issue submission with photo and location picker
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use crate::components::form::textarea_value;
use crate::components::{CitizenLayout, FieldError, LocationPicker};
use crate::context::use_portal;
use crate::models::{Location, ReportDraft, SelectedFile};
use crate::router::{navigate, CitizenRoute, Route};
use crate::services::citizen_api::MY_REPORTS;
use crate::services::{CitizenApi, SubmitError};
use crate::stores::Toast;
use crate::utils::validation::{Field, ValidationErrors};

/// Location errors are reported once under the map, whichever field failed
fn location_error(errors: &ValidationErrors) -> Option<String> {
    errors
        .get(Field::Latitude)
        .or_else(|| errors.get(Field::Longitude))
        .map(str::to_string)
}

#[function_component(ReportIssue)]
pub fn report_issue() -> Html {
    let portal = use_portal::<CitizenApi>();
    let description = use_state(String::new);
    let location = use_state(|| None::<Location>);
    let image = use_state(|| None::<SelectedFile>);
    let errors = use_state(ValidationErrors::new);
    let submitting = use_state(|| false);

    let on_description = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| description.set(textarea_value(&e)))
    };

    let on_image = {
        let image = image.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            image.set(file.map(SelectedFile::from_file));
        })
    };

    let on_location = {
        let location = location.clone();
        let errors = errors.clone();
        Callback::from(move |picked: Location| {
            location.set(Some(picked));
            let mut remaining = (*errors).clone();
            remaining.clear(Field::Latitude);
            remaining.clear(Field::Longitude);
            errors.set(remaining);
        })
    };

    let onsubmit = {
        let portal = portal.clone();
        let description = description.clone();
        let location = location.clone();
        let image = image.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let draft = ReportDraft {
                description: (*description).clone(),
                latitude: (*location).map(|l| l.latitude),
                longitude: (*location).map(|l| l.longitude),
                image: (*image).clone(),
            };
            submitting.set(true);

            let portal = portal.clone();
            let errors = errors.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match portal.api.submit_report(&draft).await {
                    Ok(_) => {
                        errors.set(ValidationErrors::new());
                        portal.queries.invalidate(MY_REPORTS);
                        portal.toasts.push(
                            Toast::success("Report Submitted Successfully")
                                .with_description("Thank you for helping improve your community."),
                        );
                        navigate(CitizenRoute::MyReports.path());
                    }
                    Err(SubmitError::Invalid(invalid)) => errors.set(invalid),
                    Err(SubmitError::Request(err)) => {
                        log::error!("❌ Report submission failed: {}", err);
                        let message = err.to_string();
                        let description = if message.is_empty() {
                            "Could not submit your report. Please try again.".to_string()
                        } else {
                            message
                        };
                        portal.toasts.push(Toast::error("Submission Failed").with_description(description));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let back_home = {
        let submitting = submitting.clone();
        Callback::from(move |_: MouseEvent| {
            if !*submitting {
                navigate(CitizenRoute::Home.path());
            }
        })
    };

    html! {
        <CitizenLayout>
            <div class="narrow">
                <div class="page-intro">
                    <button type="button" class="btn btn-ghost" onclick={back_home.clone()}>{"← Back to Home"}</button>
                    <h1 class="section-title">{"Report a Civic Issue"}</h1>
                    <p class="text-muted">
                        {"Help us improve your community by reporting infrastructure problems, safety concerns, or public service issues."}
                    </p>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">{"Issue Details"}</h2>
                        <p class="card-description">
                            {"Please provide as much detail as possible to help us address the issue effectively."}
                        </p>
                    </div>
                    <div class="card-content">
                        <form class="form-stack" {onsubmit} novalidate=true>
                            <div class="form-item">
                                <label for="description">{"Issue Description *"}</label>
                                <textarea id="description" class="textarea" placeholder="Describe the issue in detail..."
                                    value={(*description).clone()} oninput={on_description} />
                                <FieldError errors={(*errors).clone()} field={Field::Description} />
                            </div>

                            <div class="form-item">
                                <label for="photo">{"Photo Evidence (Optional)"}</label>
                                <input id="photo" type="file" class="input" accept="image/jpeg,image/png,image/webp" onchange={on_image} />
                                <p class="form-description">{"Max file size: 5MB. Accepted formats: JPG, PNG, WebP."}</p>
                                <FieldError errors={(*errors).clone()} field={Field::Image} />
                            </div>

                            <div class="form-item">
                                <label>{"Issue Location *"}</label>
                                <p class="form-description">
                                    {"Click on the map to pinpoint where the issue is located, or use \"Use My Location\" to automatically detect your current position."}
                                </p>
                                <LocationPicker on_select={on_location} initial={*location} toasts={portal.toasts.clone()} />
                                if let Some(message) = location_error(&errors) {
                                    <p class="form-message">{ message }</p>
                                }
                            </div>

                            <div class="button-row justify-end">
                                <button type="button" class="btn btn-outline" onclick={back_home} disabled={*submitting}>{"Cancel"}</button>
                                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                                    { if *submitting { "Submitting..." } else { "➤ Submit Report" } }
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </CitizenLayout>
    }
}
