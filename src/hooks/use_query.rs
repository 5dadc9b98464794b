// ============================================================================
// USE QUERY HOOK - component view of a QueryClient entry
// ============================================================================
// Cached data is shown immediately; a fetch runs on mount, on key change,
// on invalidation of the key's resource, and on window focus when stale.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use crate::error::RequestError;
use crate::services::{QueryClient, QueryEvent, QueryKey};

type BoxedFetcher<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, RequestError>>>;

struct QueryState<T> {
    data: Option<Rc<T>>,
    error: Option<RequestError>,
    loading: bool,
}

pub struct UseQueryHandle<T> {
    pub data: Option<Rc<T>>,
    pub error: Option<RequestError>,
    pub loading: bool,
    pub refetch: Callback<()>,
}

impl<T> UseQueryHandle<T> {
    /// Nothing to show yet
    pub fn is_initial_load(&self) -> bool {
        self.loading && self.data.is_none()
    }
}

#[hook]
pub fn use_query<T, F, Fut>(client: &QueryClient, key: QueryKey, fetcher: F) -> UseQueryHandle<T>
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, RequestError>> + 'static,
{
    let state = {
        let client = client.clone();
        let key = key.clone();
        use_mut_ref(move || QueryState::<T> {
            data: client.get_cached::<T>(&key),
            error: None,
            loading: true,
        })
    };
    let current_key = {
        let key = key.clone();
        use_mut_ref(move || key)
    };
    let latest_fetcher: Rc<RefCell<Option<BoxedFetcher<T>>>> = use_mut_ref(|| None);
    *latest_fetcher.borrow_mut() = Some(Rc::new(move || fetcher().boxed_local()));
    let rerender = use_force_update();

    let run: Rc<dyn Fn()> = {
        let client = client.clone();
        let state = state.clone();
        let current_key = current_key.clone();
        let latest_fetcher = latest_fetcher.clone();
        let rerender = rerender.clone();
        Rc::new(move || {
            let key = current_key.borrow().clone();
            let Some(fetcher) = latest_fetcher.borrow().clone() else {
                return;
            };
            state.borrow_mut().loading = true;
            rerender.force_update();

            let pending = client.fetch(key.clone(), move || fetcher());
            let state = state.clone();
            let current_key = current_key.clone();
            let rerender = rerender.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = pending.await;
                // the component moved on to another key meanwhile
                if *current_key.borrow() != key {
                    return;
                }
                {
                    let mut state = state.borrow_mut();
                    state.loading = false;
                    match result {
                        Ok(data) => {
                            state.data = Some(data);
                            state.error = None;
                        }
                        Err(err) => state.error = Some(err),
                    }
                }
                rerender.force_update();
            });
        })
    };

    {
        let client = client.clone();
        let state = state.clone();
        let current_key = current_key.clone();
        let run = run.clone();
        use_effect_with(key, move |key| {
            *current_key.borrow_mut() = key.clone();
            {
                let mut state = state.borrow_mut();
                state.data = client.get_cached::<T>(key);
                state.error = None;
            }
            run();
            || ()
        });
    }

    {
        let state = state.clone();
        let current_key = current_key.clone();
        let rerender = rerender.clone();
        let run = run.clone();
        use_effect_with(client.clone(), move |client| {
            let source = client.clone();
            let subscription = client.subscribe(move |event| match event {
                QueryEvent::Invalidated(resource) => {
                    if current_key.borrow().resource() == resource.as_str() {
                        run();
                    }
                }
                QueryEvent::Updated(updated) => {
                    // another component refreshed the same entry
                    if *updated == *current_key.borrow() && !source.is_fetching(updated) {
                        state.borrow_mut().data = source.get_cached::<T>(updated);
                        rerender.force_update();
                    }
                }
                QueryEvent::Cleared => {}
            });
            move || drop(subscription)
        });
    }

    {
        let client = client.clone();
        let current_key = current_key.clone();
        let run = run.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                if client.options().refetch_on_focus && client.is_stale(&current_key.borrow()) {
                    log::debug!("🔄 Window focused, refetching {}", current_key.borrow());
                    run();
                }
            }) as Box<dyn FnMut(web_sys::Event)>);

            let window = web_sys::window();
            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("focus", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("focus", listener.as_ref().unchecked_ref());
                }
                drop(listener);
            }
        });
    }

    let snapshot = state.borrow();
    UseQueryHandle {
        data: snapshot.data.clone(),
        error: snapshot.error.clone(),
        loading: snapshot.loading,
        refetch: Callback::from(move |_| run()),
    }
}
