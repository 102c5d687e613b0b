//! Search session: the single writer of [`SearchState`].
//!
//! Every mutation re-issues the search. The previous in-flight request is
//! cancelled and each request carries a generation number, so only the
//! newest request can ever update the state. Superseded requests are dropped
//! without being reported as failures.

use std::sync::Arc;
use std::time::Duration;

use bizdir_persistence::types::{PageRequest, RecordField, RecordFilter, SortDirection};
use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::fetcher::SearchFetcher;
use crate::state::{FetchStatus, FilterPatch, SearchState};

type Listener = Box<dyn Fn(&SearchState) + Send + Sync>;

struct SessionInner<F> {
    fetcher: F,
    state: RwLock<SearchState>,
    in_flight: Mutex<Option<CancellationToken>>,
    listeners: RwLock<Vec<Listener>>,
    debounce_delay: Duration,
}

/// Owns the client-side search state and keeps it in sync with the server.
///
/// Cloning is cheap; clones share the same state.
///
/// # Example
///
/// ```rust,ignore
/// use bizdir_client::{ClientConfig, FilterPatch, HttpSearchClient, SearchSession};
///
/// let config = ClientConfig::new("http://127.0.0.1:8080");
/// let session = SearchSession::new(HttpSearchClient::new(config.clone())?, &config);
///
/// session.on_change(|state| println!("{} matches", state.total));
/// session.refetch().await;
/// session.update_filters(FilterPatch::new().states(["NSW", "VIC"])).await;
/// ```
pub struct SearchSession<F> {
    inner: Arc<SessionInner<F>>,
}

impl<F> Clone for SearchSession<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: SearchFetcher> SearchSession<F> {
    /// Creates an idle session using the configured initial pagination.
    ///
    /// No request is sent until the first mutation or [`refetch`](Self::refetch).
    pub fn new(fetcher: F, config: &ClientConfig) -> Self {
        Self::build(fetcher, config.initial_page(), config.debounce_delay)
    }

    /// Creates an idle session starting from `page`.
    pub fn with_page(fetcher: F, page: PageRequest) -> Self {
        Self::build(fetcher, page, ClientConfig::default().debounce_delay)
    }

    fn build(fetcher: F, page: PageRequest, debounce_delay: Duration) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                fetcher,
                state: RwLock::new(SearchState::new(page)),
                in_flight: Mutex::new(None),
                listeners: RwLock::new(Vec::new()),
                debounce_delay,
            }),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.inner.state.read().clone()
    }

    /// Returns the fetcher this session sends requests through.
    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    /// Registers a listener invoked with a snapshot after every state change.
    ///
    /// Listeners must not register further listeners from inside the callback.
    pub fn on_change<L>(&self, listener: L)
    where
        L: Fn(&SearchState) + Send + Sync + 'static,
    {
        self.inner.listeners.write().push(Box::new(listener));
    }

    /// Merges `patch` into the filter and returns to page 1.
    pub async fn update_filters(&self, patch: FilterPatch) {
        self.mutate_and_fetch(move |state| {
            patch.apply_to(&mut state.filter);
            state.page.page = 1;
        })
        .await
    }

    /// Clears every filter and returns to page 1.
    pub async fn clear_filters(&self) {
        self.mutate_and_fetch(|state| {
            state.filter = RecordFilter::default();
            state.page.page = 1;
        })
        .await
    }

    /// Moves to `page` (1-based; 0 is treated as 1).
    pub async fn go_to_page(&self, page: u32) {
        self.mutate_and_fetch(move |state| state.page.page = page.max(1))
            .await
    }

    /// Changes the page size and returns to page 1.
    pub async fn change_page_size(&self, limit: u32) {
        self.mutate_and_fetch(move |state| {
            state.page.limit = limit.max(1);
            state.page.page = 1;
        })
        .await
    }

    /// Sorts by `field` and returns to page 1.
    ///
    /// Sorting by the field already sorted ascending flips to descending;
    /// anything else sorts ascending.
    pub async fn sort_by(&self, field: RecordField) {
        self.mutate_and_fetch(move |state| {
            let page = &mut state.page;
            let direction = if page.sort_field == Some(field)
                && page.sort_direction == SortDirection::Asc
            {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            page.sort_field = Some(field);
            page.sort_direction = direction;
            page.page = 1;
        })
        .await
    }

    /// Re-issues the search for the current state.
    pub async fn refetch(&self) {
        self.mutate_and_fetch(|_| {}).await
    }

    async fn mutate_and_fetch<M>(&self, mutate: M)
    where
        M: FnOnce(&mut SearchState),
    {
        let token = CancellationToken::new();

        let (generation, filter, page) = {
            let mut state = self.inner.state.write();
            mutate(&mut state);
            state.generation += 1;
            state.status = FetchStatus::Fetching;

            if let Some(previous) = self.inner.in_flight.lock().replace(token.clone()) {
                previous.cancel();
            }

            (state.generation, state.filter.clone(), state.page.clone())
        };
        self.notify();

        debug!(
            generation,
            page = page.page,
            limit = page.limit,
            "Issuing directory search"
        );

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(generation, "Search superseded before completion");
                return;
            }
            result = self.inner.fetcher.search(&filter, &page) => result,
        };

        {
            let mut state = self.inner.state.write();
            if state.generation != generation {
                debug!(
                    generation,
                    current = state.generation,
                    "Discarding stale search result"
                );
                return;
            }

            match result {
                Ok(envelope) => state.apply(envelope),
                Err(e) => {
                    warn!(generation, error = %e, "Directory search failed");
                    state.status = FetchStatus::Failed(e.to_string());
                }
            }
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.state();
        for listener in self.inner.listeners.read().iter() {
            listener(&snapshot);
        }
    }
}

impl<F: SearchFetcher + 'static> SearchSession<F> {
    /// Returns a debouncer that feeds filter patches into this session.
    ///
    /// Patches submitted faster than the configured debounce delay collapse
    /// into the last one, which is applied with
    /// [`update_filters`](Self::update_filters). Meant for free-text inputs
    /// such as the search box and postcode.
    pub fn debounced_filters(&self) -> Debouncer<FilterPatch> {
        let session = self.clone();
        Debouncer::new(self.inner.debounce_delay, move |patch| {
            let session = session.clone();
            tokio::spawn(async move { session.update_filters(patch).await });
        })
    }
}
