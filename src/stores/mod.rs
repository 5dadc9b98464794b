pub mod session_store;
pub mod toast_store;

pub use session_store::{BrowserSessionStore, MemorySessionStore, SessionStore, ADMIN_TOKEN_KEY, CITIZEN_TOKEN_KEY};
pub use toast_store::{Notifier, Toast, ToastKind, ToastStore, ToastSubscription};
