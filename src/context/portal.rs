// ============================================================================
// PORTAL CONTEXT - session, API, query cache and toasts for one portal
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;
use crate::config::CONFIG;
use crate::services::{AdminApi, CitizenApi, QueryClient, QueryOptions};
use crate::stores::{BrowserSessionStore, SessionStore, ToastStore, ADMIN_TOKEN_KEY, CITIZEN_TOKEN_KEY};

/// API facade of a portal and how to build it for the browser
pub trait PortalApi: Clone + 'static {
    const TOKEN_KEY: &'static str;

    fn for_browser(session: Rc<dyn SessionStore>, toasts: &ToastStore) -> Self;
}

impl PortalApi for AdminApi {
    const TOKEN_KEY: &'static str = ADMIN_TOKEN_KEY;

    fn for_browser(session: Rc<dyn SessionStore>, toasts: &ToastStore) -> Self {
        AdminApi::from_config(session, Rc::new(toasts.clone()))
    }
}

impl PortalApi for CitizenApi {
    const TOKEN_KEY: &'static str = CITIZEN_TOKEN_KEY;

    fn for_browser(session: Rc<dyn SessionStore>, _toasts: &ToastStore) -> Self {
        CitizenApi::from_config(session)
    }
}

#[derive(Clone)]
pub struct PortalContext<A: PortalApi> {
    pub api: A,
    pub session: Rc<dyn SessionStore>,
    pub queries: QueryClient,
    pub toasts: ToastStore,
}

impl<A: PortalApi> PartialEq for PortalContext<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.session) as *const u8 == Rc::as_ptr(&other.session) as *const u8
            && self.queries == other.queries
            && self.toasts == other.toasts
    }
}

impl<A: PortalApi> PortalContext<A> {
    pub fn browser() -> Self {
        let session: Rc<dyn SessionStore> = Rc::new(BrowserSessionStore::new(A::TOKEN_KEY));
        let toasts = ToastStore::new();
        Self {
            api: A::for_browser(session.clone(), &toasts),
            session,
            queries: QueryClient::new(QueryOptions::from_config(&CONFIG.query_config)),
            toasts,
        }
    }
}

pub type AdminContext = PortalContext<AdminApi>;
pub type CitizenContext = PortalContext<CitizenApi>;

/// Portal services from the nearest `ContextProvider`
#[hook]
pub fn use_portal<A: PortalApi>() -> PortalContext<A> {
    use_context::<PortalContext<A>>().unwrap_or_else(|| {
        log::warn!("⚠️ No portal context provided, using a detached one");
        PortalContext::<A>::browser()
    })
}
