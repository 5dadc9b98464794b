use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use crate::utils::validation::{Field, ValidationErrors};

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Binds a text input to a string state
pub fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| state.set(input_value(&e)))
}

#[derive(Properties, PartialEq)]
pub struct FieldErrorProps {
    pub errors: ValidationErrors,
    pub field: Field,
}

#[function_component(FieldError)]
pub fn field_error(props: &FieldErrorProps) -> Html {
    match props.errors.get(props.field) {
        Some(message) => html! { <p class="form-message">{ message }</p> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
    /// Extra buttons next to "Try Again"
    #[prop_or_default]
    pub children: Html,
}

/// Inline error card with an optional retry button
#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="card error-panel">
            if let Some(icon) = &props.icon {
                <div class="error-icon">{ icon }</div>
            }
            <h3 class="error-title">{ &props.title }</h3>
            <p class="error-message">{ &props.message }</p>
            <div class="button-row">
                if let Some(retry) = &props.on_retry {
                    <button type="button" class="btn btn-outline" onclick={retry.reform(|_: MouseEvent| ())}>
                        {"Try Again"}
                    </button>
                }
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SkeletonProps {
    #[prop_or_default]
    pub class: AttrValue,
}

#[function_component(Skeleton)]
pub fn skeleton(props: &SkeletonProps) -> Html {
    html! { <div class={classes!("skeleton", props.class.to_string())}></div> }
}
