// ============================================================================
// LOAD ERROR - what a page shows when its query failed with no data
// ============================================================================
// A 401 has already cleared the token, so retrying is pointless: the page
// asks for a new login instead.
// ============================================================================

use yew::prelude::*;
use crate::error::RequestError;
use super::form::ErrorPanel;
use super::link::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    SignedOut,
    Retryable,
}

impl LoadFailure {
    pub fn of(error: &RequestError) -> Self {
        if error.is_unauthorized() {
            LoadFailure::SignedOut
        } else {
            LoadFailure::Retryable
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadErrorProps {
    pub error: RequestError,
    pub title: AttrValue,
    /// Defaults to the error's own message
    #[prop_or_default]
    pub message: Option<AttrValue>,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    pub on_retry: Callback<()>,
    pub login_path: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(LoadError)]
pub fn load_error(props: &LoadErrorProps) -> Html {
    match LoadFailure::of(&props.error) {
        LoadFailure::SignedOut => {
            log::warn!("🔒 Session rejected by the API, asking for a new login");
            html! {
                <ErrorPanel
                    icon="⚠️"
                    title="Authentication Required"
                    message="Your session has expired. Please log in again."
                >
                    <Link to={props.login_path.clone()} class={classes!("btn", "btn-primary")}>
                        {"Go to Login"}
                    </Link>
                </ErrorPanel>
            }
        }
        LoadFailure::Retryable => {
            let message = props
                .message
                .clone()
                .unwrap_or_else(|| AttrValue::from(props.error.to_string()));
            html! {
                <ErrorPanel
                    icon={props.icon.clone()}
                    title={props.title.clone()}
                    {message}
                    on_retry={props.on_retry.clone()}
                >
                    { props.children.clone() }
                </ErrorPanel>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_session_asks_for_login() {
        assert_eq!(LoadFailure::of(&RequestError::Unauthorized("expired".into())), LoadFailure::SignedOut);
        assert_eq!(LoadFailure::of(&RequestError::SignedOut("log in".into())), LoadFailure::SignedOut);
    }

    #[test]
    fn other_failures_offer_retry() {
        let server = RequestError::Status { status: 500, message: "boom".into() };
        assert_eq!(LoadFailure::of(&server), LoadFailure::Retryable);
        assert_eq!(LoadFailure::of(&RequestError::Network("offline".into())), LoadFailure::Retryable);
    }
}
