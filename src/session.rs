//! Session-scoped browser state and the actions that drive it.
//!
//! A [`BrowserSession`] owns the active [`Query`], the [`ViewState`] and a
//! monotonically increasing fetch-cycle counter. Every user action runs one
//! fetch cycle and reports its progress through a callback, so the library
//! stays silent while the binary decides what to print.

use crate::catalog::CharacterCatalog;
use crate::fetcher::{FetchOutcome, ResultFetcher};
use crate::query::Query;
use crate::view_state::ViewState;

/// Progress event emitted while a fetch cycle runs.
///
/// These events allow callers to display status without the library
/// printing anything itself.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    /// A fetch cycle started for the given URL
    FetchStarted { url: String },
    /// The page arrived and was enriched
    PageLoaded {
        character_count: usize,
        total: Option<u64>,
    },
    /// The catalog reported that nothing matches
    NoMatches,
    /// The fetch cycle failed
    FetchFailed { message: String },
}

/// Drives a character catalog and owns the resulting view state.
pub struct BrowserSession<C> {
    fetcher: ResultFetcher<C>,
    query: Query,
    state: ViewState,
    next_seq: u64,
}

impl<C: CharacterCatalog> BrowserSession<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            fetcher: ResultFetcher::new(catalog),
            query: Query::default(),
            state: ViewState::default(),
            next_seq: 0,
        }
    }

    /// The current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The currently active filters.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Loads the unfiltered first page. Meant to run once at startup.
    pub fn load_initial<F: FnMut(FetchEvent)>(&mut self, on_event: F) {
        let url = self.fetcher.base_url();
        self.run_cycle(url, on_event);
    }

    /// Applies `query` as the active filter set and fetches the first
    /// matching page.
    pub fn search<F: FnMut(FetchEvent)>(&mut self, query: Query, on_event: F) {
        let url = query.filter_url(&self.fetcher.base_url());
        self.query = query;
        self.run_cycle(url, on_event);
    }

    /// Resets all filters and reloads the unfiltered base resource.
    pub fn clear_filters<F: FnMut(FetchEvent)>(&mut self, on_event: F) {
        self.query = Query::default();
        let url = self.fetcher.base_url();
        self.run_cycle(url, on_event);
    }

    /// Follows the `next` pagination link, if one exists and no fetch is
    /// in flight. Returns false when the action was not available.
    pub fn next_page<F: FnMut(FetchEvent)>(&mut self, on_event: F) -> bool {
        match self.pagination_link(|info| info.next.clone()) {
            Some(url) => {
                self.run_cycle(url, on_event);
                true
            }
            None => false,
        }
    }

    /// Follows the `prev` pagination link, if one exists and no fetch is
    /// in flight. Returns false when the action was not available.
    pub fn prev_page<F: FnMut(FetchEvent)>(&mut self, on_event: F) -> bool {
        match self.pagination_link(|info| info.prev.clone()) {
            Some(url) => {
                self.run_cycle(url, on_event);
                true
            }
            None => false,
        }
    }

    fn pagination_link(
        &self,
        pick: impl Fn(&crate::catalog::PageInfo) -> Option<String>,
    ) -> Option<String> {
        if self.state.loading {
            return None;
        }
        self.state.info.as_ref().and_then(pick)
    }

    /// Runs one sequence-tagged fetch cycle and applies its outcome.
    ///
    /// Pagination links are used verbatim as the catalog supplied them.
    fn run_cycle<F: FnMut(FetchEvent)>(&mut self, url: String, mut on_event: F) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.state.begin_cycle(seq);
        on_event(FetchEvent::FetchStarted { url: url.clone() });

        let outcome = self.fetcher.fetch(&url);
        match &outcome {
            FetchOutcome::Success { characters, info } => on_event(FetchEvent::PageLoaded {
                character_count: characters.len(),
                total: info.as_ref().map(|i| i.count),
            }),
            FetchOutcome::Empty => on_event(FetchEvent::NoMatches),
            FetchOutcome::Failed { message } => on_event(FetchEvent::FetchFailed {
                message: message.clone(),
            }),
        }

        self.state.apply(seq, outcome);
    }
}
