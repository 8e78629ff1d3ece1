//! Catalog session: the mount-to-unmount lifecycle.
//!
//! A session owns the store, the search controller and the set of
//! in-flight requests. All state changes happen on the task that drives
//! [`CatalogSession::next_update`]; request futures only produce
//! [`SearchResponse`]s, which are checked against the latest ticket before
//! they touch the store.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use super::presenter::CatalogView;
use super::search::{
    InputOutcome, Resolution, SearchController, SearchPhase, SearchRequest, SearchResponse, Ticket,
};
use super::store::CatalogStore;
use crate::adapters::{
    FetchError, NoopTabWidget, PageViewLogger, ResourceQuery, ResourceSource, TabWidget,
    TracingPageViews,
};
use crate::config::ResolvedConfig;
use crate::domain::Tab;

/// Path reported to the page-view logger on mount
pub const RESOURCES_PAGE: &str = "/resources";

/// Side-effect collaborators invoked once per mount
#[derive(Clone)]
pub struct Collaborators {
    pub page_views: Arc<dyn PageViewLogger>,
    pub tabs: Arc<dyn TabWidget>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            page_views: Arc::new(TracingPageViews),
            tabs: Arc::new(NoopTabWidget),
        }
    }
}

/// Something observable that happened while driving the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Debounce timer fired and a request was sent
    Dispatched { ticket: Ticket, term: String },

    /// Latest request completed; catalog replaced
    Applied {
        ticket: Ticket,
        term: String,
        count: usize,
    },

    /// Stale response discarded
    Superseded { ticket: Ticket, term: String },

    /// Latest request failed; catalog unchanged
    Failed {
        ticket: Ticket,
        term: String,
        error: FetchError,
    },
}

/// A mounted catalog
pub struct CatalogSession {
    source: Arc<dyn ResourceSource>,
    search: SearchController,
    store: CatalogStore,
    in_flight: JoinSet<SearchResponse>,
    featured_limit: usize,
    initial_error: Option<FetchError>,
}

impl CatalogSession {
    /// Mount: load the unfiltered catalog, then initialize the tab widget
    /// and log the page view.
    ///
    /// A failed initial load is not fatal; the catalog starts empty.
    #[instrument(skip_all, fields(source = source.name()))]
    pub async fn mount(
        source: Arc<dyn ResourceSource>,
        config: &ResolvedConfig,
        collaborators: &Collaborators,
    ) -> Self {
        let mut store = CatalogStore::new();

        let initial_error = match source.fetch_resources(&ResourceQuery::all()).await {
            Ok(resources) => {
                info!(count = resources.len(), "Catalog loaded");
                store.initialize(resources);
                None
            }
            Err(err) => {
                warn!("Initial load failed, starting with an empty catalog: {}", err);
                store.initialize(Vec::new());
                Some(err)
            }
        };

        collaborators.tabs.init_tabs(&Tab::ALL);
        collaborators.page_views.log_page_view(RESOURCES_PAGE);

        Self {
            source,
            search: SearchController::new(config.search),
            store,
            in_flight: JoinSet::new(),
            featured_limit: config.featured_limit,
            initial_error,
        }
    }

    /// Search box contents changed
    pub fn input_changed(&mut self, term: &str) -> InputOutcome {
        self.store.set_pending_term(term);
        self.search.on_input_change(term, Instant::now())
    }

    /// Search form submitted; the request goes out immediately
    pub fn submit(&mut self, term: &str) -> Ticket {
        self.store.set_pending_term(term);
        let request = self.search.on_submit(term);
        self.dispatch(request)
    }

    /// Disarm the debounce timer
    pub fn cancel_pending(&mut self) -> bool {
        self.search.cancel_pending()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.store.select_tab(tab);
    }

    /// Whether a timer is armed or a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.search.next_deadline().is_some() || !self.in_flight.is_empty()
    }

    /// Wait for the next timer firing or response.
    ///
    /// Returns `None` once nothing is pending.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        loop {
            let deadline = self.search.next_deadline();
            if deadline.is_none() && self.in_flight.is_empty() {
                return None;
            }

            tokio::select! {
                _ = wait_until(deadline) => {
                    if let Some(request) = self.search.poll_timer(Instant::now()) {
                        let term = request.term.clone();
                        let ticket = self.dispatch(request);
                        return Some(SessionUpdate::Dispatched { ticket, term });
                    }
                }
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    match joined {
                        Ok(response) => return Some(self.resolve(response)),
                        Err(err) => warn!("Search task ended abnormally: {}", err),
                    }
                }
            }
        }
    }

    /// Drive the session until nothing is pending
    pub async fn settle(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    /// Render model for the current state
    pub fn view(&self) -> CatalogView {
        CatalogView::build(&self.store, self.search.phase(), self.featured_limit)
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn phase(&self) -> SearchPhase {
        self.search.phase()
    }

    /// Error from the initial load, if it failed
    pub fn initial_error(&self) -> Option<&FetchError> {
        self.initial_error.as_ref()
    }

    /// Tear down. Pending timers are dropped and outstanding requests are
    /// detached; none of their results will be applied.
    pub fn unmount(mut self) {
        let outstanding = self.in_flight.len();
        self.search.cancel_pending();
        self.in_flight.detach_all();
        info!(outstanding, "Catalog unmounted");
    }

    #[instrument(skip(self, request), fields(ticket = %request.ticket))]
    fn dispatch(&mut self, request: SearchRequest) -> Ticket {
        let ticket = request.ticket;
        let source = Arc::clone(&self.source);
        info!(term = %request.term, "Dispatching search");

        // The fetch runs in its own task so a panicking source still yields
        // a ticketed response.
        self.in_flight.spawn(async move {
            let query = request.query();
            let fetch = tokio::spawn(async move { source.fetch_resources(&query).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(err) => Err(FetchError::Transport(format!("Search task failed: {}", err))),
            };

            SearchResponse {
                ticket: request.ticket,
                term: request.term,
                result,
            }
        });

        ticket
    }

    fn resolve(&mut self, response: SearchResponse) -> SessionUpdate {
        let ticket = response.ticket;
        let term = response.term.clone();

        match self.search.accept(response) {
            Resolution::Apply(resources) => {
                let count = resources.len();
                info!(%ticket, %term, count, "Search results applied");
                self.store.apply_search_result(resources);
                SessionUpdate::Applied {
                    ticket,
                    term,
                    count,
                }
            }
            Resolution::Superseded => SessionUpdate::Superseded { ticket, term },
            Resolution::Failed(error) => {
                warn!(%ticket, %term, "Search failed: {}", error);
                SessionUpdate::Failed {
                    ticket,
                    term,
                    error,
                }
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
