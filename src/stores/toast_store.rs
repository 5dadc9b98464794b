// ============================================================================
// TOAST STORE - transient notifications with subscribers
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Info => "toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self { id: 0, title: title.into(), description: None, kind }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Anything that can surface a toast to the user
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct ToastInner {
    toasts: RefCell<Vec<Toast>>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

/// Shared toast list. Dismissal timing belongs to the view (`Toaster`).
#[derive(Clone, Default)]
pub struct ToastStore {
    inner: Rc<ToastInner>,
}

impl PartialEq for ToastStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    pub fn push(&self, mut toast: Toast) -> u64 {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        toast.id = id;
        self.inner.toasts.borrow_mut().push(toast);
        self.emit();
        id
    }

    pub fn dismiss(&self, id: u64) {
        let removed = {
            let mut toasts = self.inner.toasts.borrow_mut();
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            before != toasts.len()
        };
        if removed {
            self.emit();
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ToastSubscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        ToastSubscription { store: Rc::downgrade(&self.inner), id }
    }

    fn emit(&self) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl Notifier for ToastStore {
    fn notify(&self, toast: Toast) {
        self.push(toast);
    }
}

/// Unsubscribes on drop
pub struct ToastSubscription {
    store: Weak<ToastInner>,
    id: usize,
}

impl Drop for ToastSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
