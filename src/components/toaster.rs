// ============================================================================
// TOASTER - renders the ToastStore and dismisses each toast on a timer
// ============================================================================

use std::collections::HashMap;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use crate::config::CONFIG;
use crate::stores::ToastStore;

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub store: ToastStore,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    let rerender = use_force_update();
    let timers = use_mut_ref(HashMap::<u64, Timeout>::new);

    {
        let rerender = rerender.clone();
        use_effect_with(props.store.clone(), move |store| {
            let subscription = store.subscribe(move || rerender.force_update());
            move || drop(subscription)
        });
    }

    let toasts = props.store.toasts();

    // one timer per visible toast; timers of dismissed toasts are dropped
    {
        let mut timers = timers.borrow_mut();
        timers.retain(|id, _| toasts.iter().any(|t| t.id == *id));
        for toast in &toasts {
            if timers.contains_key(&toast.id) {
                continue;
            }
            let store = props.store.clone();
            let id = toast.id;
            timers.insert(id, Timeout::new(CONFIG.ui_config.toast_duration_ms, move || store.dismiss(id)));
        }
    }

    html! {
        <div class="toaster" aria-live="polite">
            { for toasts.iter().map(|toast| {
                let on_close = {
                    let store = props.store.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| store.dismiss(id))
                };
                html! {
                    <div key={toast.id.to_string()} class={classes!("toast", toast.kind.css_class())} role="status">
                        <div class="toast-body">
                            <strong class="toast-title">{ &toast.title }</strong>
                            if let Some(description) = &toast.description {
                                <p class="toast-description">{ description }</p>
                            }
                        </div>
                        <button type="button" class="toast-close" aria-label="Close" onclick={on_close}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
