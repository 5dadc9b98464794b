// ============================================================================
// QUERY CACHE - keyed fetch results, request dedupe, prefix invalidation
// ============================================================================
// Entries are type-erased (`Rc<dyn Any>`) so one client serves every page.
// A fetch is registered synchronously: a second caller with the same key
// before the first resolves joins the same future instead of refetching.
// ============================================================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};
use chrono::{DateTime, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use crate::config::QueryConfig;
use crate::error::RequestError;

/// Resource name followed by the parameters that select one variant of it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(resource: &str) -> Self {
        Self(vec![resource.to_string()])
    }

    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn resource(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
    pub retry: u32,
    pub retry_delay_ms: u32,
    pub stale_time_ms: i64,
    pub refetch_on_focus: bool,
}

impl QueryOptions {
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            retry: config.retry,
            retry_delay_ms: config.retry_delay_ms,
            stale_time_ms: config.stale_time_ms,
            refetch_on_focus: config.refetch_on_focus,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
    /// Fresh data stored for this key
    Updated(QueryKey),
    /// Every key of this resource is now invalid
    Invalidated(String),
    Cleared,
}

type ErasedResult = Result<Rc<dyn Any>, RequestError>;
type SharedFetch = Shared<LocalBoxFuture<'static, ErasedResult>>;
type Listener = Rc<dyn Fn(&QueryEvent)>;

struct CacheEntry {
    data: Rc<dyn Any>,
    updated_at: DateTime<Utc>,
    invalidated: bool,
}

struct InFlight {
    generation: u64,
    future: SharedFetch,
}

struct QueryInner {
    options: QueryOptions,
    entries: RefCell<HashMap<QueryKey, CacheEntry>>,
    in_flight: RefCell<HashMap<QueryKey, InFlight>>,
    next_generation: Cell<u64>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<QueryInner>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            inner: Rc::new(QueryInner {
                options,
                entries: RefCell::new(HashMap::new()),
                in_flight: RefCell::new(HashMap::new()),
                next_generation: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.inner.options
    }

    /// Runs `fetcher` for `key` unless a fetch for the same key is already in flight.
    /// The request is registered before the returned future is first polled.
    pub fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> impl Future<Output = Result<Rc<T>, RequestError>>
    where
        T: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, RequestError>> + 'static,
    {
        let (generation, shared) = self.register(&key, fetcher);
        let client = self.clone();

        async move {
            let result = shared.await;
            client.complete(&key, generation, &result);
            match result {
                Ok(data) => data
                    .downcast::<T>()
                    .map_err(|_| RequestError::Decode(format!("cached value for {} has another type", key))),
                Err(err) => Err(err),
            }
        }
    }

    fn register<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> (u64, SharedFetch)
    where
        T: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, RequestError>> + 'static,
    {
        if let Some(existing) = self.inner.in_flight.borrow().get(key) {
            log::debug!("🔗 Joining in-flight query {}", key);
            return (existing.generation, existing.future.clone());
        }

        let generation = self.inner.next_generation.get() + 1;
        self.inner.next_generation.set(generation);

        let options = self.inner.options;
        let future = async move {
            run_with_retry(&fetcher, options)
                .await
                .map(|data| Rc::new(data) as Rc<dyn Any>)
        }
        .boxed_local()
        .shared();

        self.inner.in_flight.borrow_mut().insert(
            key.clone(),
            InFlight { generation, future: future.clone() },
        );
        (generation, future)
    }

    /// Stores the result once per fetch; results of invalidated fetches are dropped
    fn complete(&self, key: &QueryKey, generation: u64, result: &ErasedResult) {
        let current = {
            let mut in_flight = self.inner.in_flight.borrow_mut();
            match in_flight.get(key) {
                Some(entry) if entry.generation == generation => {
                    in_flight.remove(key);
                    true
                }
                _ => false,
            }
        };
        if !current {
            return;
        }

        match result {
            Ok(data) => {
                self.inner.entries.borrow_mut().insert(
                    key.clone(),
                    CacheEntry { data: data.clone(), updated_at: Utc::now(), invalidated: false },
                );
                self.emit(&QueryEvent::Updated(key.clone()));
            }
            Err(err) => log::warn!("⚠️ Query {} failed: {}", key, err),
        }
    }

    pub fn get_cached<T: 'static>(&self, key: &QueryKey) -> Option<Rc<T>> {
        let data = self.inner.entries.borrow().get(key)?.data.clone();
        data.downcast::<T>().ok()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner.in_flight.borrow().contains_key(key)
    }

    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        self.inner
            .entries
            .borrow()
            .get(key)
            .map_or(false, |entry| entry.invalidated)
    }

    /// Missing, invalidated, or older than the stale time
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        match self.inner.entries.borrow().get(key) {
            None => true,
            Some(entry) if entry.invalidated => true,
            Some(entry) => {
                let age = Utc::now().signed_duration_since(entry.updated_at).num_milliseconds();
                age >= self.inner.options.stale_time_ms
            }
        }
    }

    /// Marks every key of `resource` invalid and abandons its in-flight fetches
    pub fn invalidate(&self, resource: &str) {
        let mut marked = 0;
        for (key, entry) in self.inner.entries.borrow_mut().iter_mut() {
            if key.resource() == resource {
                entry.invalidated = true;
                marked += 1;
            }
        }
        self.inner
            .in_flight
            .borrow_mut()
            .retain(|key, _| key.resource() != resource);

        log::info!("♻️ Invalidated {} cached {} entries", marked, resource);
        self.emit(&QueryEvent::Invalidated(resource.to_string()));
    }

    pub fn clear(&self) {
        self.inner.entries.borrow_mut().clear();
        self.inner.in_flight.borrow_mut().clear();
        self.emit(&QueryEvent::Cleared);
    }

    pub fn subscribe(&self, listener: impl Fn(&QueryEvent) + 'static) -> QuerySubscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        QuerySubscription { client: Rc::downgrade(&self.inner), id }
    }

    fn emit(&self, event: &QueryEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

async fn run_with_retry<T, F, Fut>(fetcher: &F, options: QueryOptions) -> Result<T, RequestError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(data) => return Ok(data),
            Err(err) if err.is_retryable() && attempt < options.retry => {
                attempt += 1;
                log::warn!("🔁 Retrying query ({}/{}) after: {}", attempt, options.retry, err);
                if options.retry_delay_ms > 0 {
                    gloo_timers::future::TimeoutFuture::new(options.retry_delay_ms).await;
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// Unsubscribes on drop
pub struct QuerySubscription {
    client: Weak<QueryInner>,
    id: usize,
}

impl Drop for QuerySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.client.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{block_on, counter};

    fn client() -> QueryClient {
        QueryClient::new(QueryOptions { retry_delay_ms: 0, ..QueryOptions::default() })
    }

    fn reports_key(page: u32) -> QueryKey {
        QueryKey::new("reports").with("all").with("all").with(page)
    }

    #[test]
    fn concurrent_fetches_for_one_key_share_a_request() {
        let client = client();
        let calls = counter();
        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                async { Ok::<_, RequestError>(vec![1, 2, 3]) }
            }
        };

        let first = client.fetch(reports_key(1), fetcher.clone());
        let second = client.fetch(reports_key(1), fetcher);
        assert!(client.is_fetching(&reports_key(1)));

        let (a, b) = block_on(futures::future::join(first, second));
        assert_eq!(calls.get(), 1);
        assert!(Rc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert!(!client.is_fetching(&reports_key(1)));
        assert_eq!(client.get_cached::<Vec<i32>>(&reports_key(1)).as_deref(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn failure_is_retried_once() {
        let client = client();
        let calls = counter();
        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                let attempt = calls.get();
                async move {
                    if attempt == 1 {
                        Err(RequestError::Network("offline".into()))
                    } else {
                        Ok(attempt)
                    }
                }
            }
        };

        let result = block_on(client.fetch(QueryKey::new("dashboard"), fetcher));
        assert_eq!(*result.unwrap(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unauthorized_is_not_retried() {
        let client = client();
        let calls = counter();
        let fetcher = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                async { Err::<u8, _>(RequestError::Unauthorized("expired".into())) }
            }
        };

        let result = block_on(client.fetch(QueryKey::new("my-reports"), fetcher));
        assert!(result.unwrap_err().is_unauthorized());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalidation_covers_every_variant_of_a_resource() {
        let client = client();
        for page in 1..=2 {
            block_on(client.fetch(reports_key(page), move || async move { Ok::<_, RequestError>(page) })).unwrap();
        }
        block_on(client.fetch(QueryKey::new("departments"), || async { Ok::<_, RequestError>(0) })).unwrap();

        let events = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let events = events.clone();
            client.subscribe(move |event| events.borrow_mut().push(event.clone()))
        };

        client.invalidate("reports");

        assert!(client.is_invalidated(&reports_key(1)));
        assert!(client.is_invalidated(&reports_key(2)));
        assert!(!client.is_invalidated(&QueryKey::new("departments")));
        // stale data is still served while the refetch runs
        assert_eq!(client.get_cached::<u32>(&reports_key(2)).as_deref(), Some(&2));
        assert_eq!(*events.borrow(), vec![QueryEvent::Invalidated("reports".into())]);
    }

    #[test]
    fn fetch_abandoned_by_invalidation_is_not_stored() {
        let client = client();
        let pending = client.fetch(reports_key(1), || async { Ok::<_, RequestError>("old") });
        client.invalidate("reports");

        let result = block_on(pending);
        assert_eq!(*result.unwrap(), "old");
        assert!(client.get_cached::<&str>(&reports_key(1)).is_none());
    }

    #[test]
    fn staleness_follows_stale_time() {
        let always_stale = client();
        block_on(always_stale.fetch(QueryKey::new("analytics"), || async { Ok::<_, RequestError>(1) })).unwrap();
        assert!(always_stale.is_stale(&QueryKey::new("analytics")));

        let lenient = QueryClient::new(QueryOptions { stale_time_ms: 60_000, ..QueryOptions::default() });
        block_on(lenient.fetch(QueryKey::new("analytics"), || async { Ok::<_, RequestError>(1) })).unwrap();
        assert!(!lenient.is_stale(&QueryKey::new("analytics")));
        lenient.invalidate("analytics");
        assert!(lenient.is_stale(&QueryKey::new("analytics")));
    }
}
