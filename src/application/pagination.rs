// SPDX-License-Identifier: MPL-2.0
//! Incremental search and pagination controller.
//!
//! The controller owns the query, page counter, result set and fetch state.
//! It never performs I/O itself: [`PaginationController::search`],
//! [`PaginationController::load_more`] and [`PaginationController::refresh`]
//! hand back a [`FetchTicket`] describing the request to issue, and the
//! caller reports the outcome through [`PaginationController::apply`].
//!
//! # Ordering
//!
//! Every search bumps a [`RequestEpoch`]. Tickets carry the epoch they were
//! issued under and a response is merged only when its ticket is the one
//! currently in flight for the current epoch. Superseded requests are not
//! cancelled; their responses are discarded on arrival as
//! [`ApplyOutcome::Stale`].
//!
//! # Example
//!
//! ```
//! use voice_lens::application::pagination::{ApplyOutcome, PaginationController};
//! use voice_lens::domain::search::{FetchState, PageResponse, PageSize};
//!
//! let mut controller = PaginationController::new(PageSize::new(16));
//! let ticket = controller.search("mountains").expect("non-empty query");
//! assert!(controller.fetch_state().is_loading());
//!
//! let outcome = controller.apply(&ticket, Ok(PageResponse::default()));
//! assert_eq!(outcome, ApplyOutcome::Empty);
//! assert_eq!(controller.fetch_state(), &FetchState::Empty);
//! ```

use crate::application::port::{ImageSearch, SearchFuture};
use crate::domain::error::SearchError;
use crate::domain::search::{
    FetchState, PageNumber, PageResponse, PageSize, Query, RequestEpoch, ResultSet,
};

/// Whether a ticket fetches the first page of a query or a following one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1 of a new search; replaces the result set.
    FirstPage,
    /// A following page of the committed query; appends to the result set.
    NextPage,
}

/// A request the caller must issue on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: RequestEpoch,
    query: Query,
    page: PageNumber,
    page_size: PageSize,
    kind: FetchKind,
}

impl FetchTicket {
    /// Epoch the ticket was issued under.
    #[must_use]
    pub fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    /// Query to search for.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// One-based page to request.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Number of items to request.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Whether the response replaces or extends the result set.
    #[must_use]
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Issues the request against a search provider.
    #[must_use]
    pub fn dispatch(&self, search: &dyn ImageSearch) -> SearchFuture {
        search.fetch(&self.query, self.page, self.page_size)
    }
}

/// What [`PaginationController::apply`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A first page replaced the result set.
    Replaced {
        /// Number of items received.
        count: usize,
    },
    /// A following page was appended.
    Appended {
        /// Number of items received.
        count: usize,
    },
    /// A following page came back empty; the result set is complete.
    EndOfResults,
    /// The first page of the query came back empty.
    Empty,
    /// The request failed; the result set is unchanged.
    Failed(SearchError),
    /// The ticket belongs to a superseded request and was discarded.
    Stale,
}

/// Read-only snapshot of pagination state for UI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationInfo {
    /// Highest requested page of the committed query.
    pub page: PageNumber,
    /// Number of items in the result set.
    pub item_count: usize,
    /// Total matches reported by the server, when known.
    pub total_available: Option<u64>,
    /// Whether `load_more` would issue a request.
    pub can_load_more: bool,
    /// Whether a request is in flight.
    pub is_loading: bool,
}

/// Owns query, page, results and fetch state for one session.
#[derive(Debug, Clone)]
pub struct PaginationController {
    /// Query whose first page was applied last.
    query: Option<Query>,
    /// Most recent search intent, committed or not.
    intent: Option<Query>,
    page: PageNumber,
    /// Highest page actually merged into `results`.
    completed_page: PageNumber,
    page_size: PageSize,
    results: ResultSet,
    fetch_state: FetchState,
    epoch: RequestEpoch,
    /// Page of the authoritative request for the current epoch.
    in_flight: Option<PageNumber>,
    exhausted: bool,
    total_available: Option<u64>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PaginationController {
    /// Creates an idle controller requesting `page_size` items per page.
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            query: None,
            intent: None,
            page: PageNumber::FIRST,
            completed_page: PageNumber::FIRST,
            page_size,
            results: ResultSet::new(),
            fetch_state: FetchState::Idle,
            epoch: RequestEpoch::default(),
            in_flight: None,
            exhausted: false,
            total_available: None,
        }
    }

    /// Starts a new search.
    ///
    /// Returns `None` without touching any state when `input` is blank.
    /// Otherwise bumps the epoch, resets the page to 1 and enters `Loading`.
    /// The result set and committed query only change once the response is
    /// applied.
    pub fn search(&mut self, input: &str) -> Option<FetchTicket> {
        let query = Query::parse(input)?;
        Some(self.begin_search(query))
    }

    /// Re-runs page 1 of the latest search intent.
    ///
    /// Works from any state, including `Error`, and counts as a new search.
    /// Returns `None` if nothing was ever searched.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let query = self.intent.clone()?;
        Some(self.begin_search(query))
    }

    /// Requests the next page of the committed query.
    ///
    /// No-op unless the last fetch succeeded and the result set is not known
    /// to be complete: `Idle`, `Loading`, `Empty` and `Error` all return
    /// `None` with the state unchanged.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() {
            return None;
        }
        let query = self.query.clone()?;

        self.page = self.page.next();
        self.fetch_state = FetchState::Loading;
        self.in_flight = Some(self.page);

        Some(FetchTicket {
            epoch: self.epoch,
            query,
            page: self.page,
            page_size: self.page_size,
            kind: FetchKind::NextPage,
        })
    }

    /// Merges the outcome of a ticket into the controller state.
    ///
    /// Responses of superseded tickets are discarded without any state
    /// change.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse, SearchError>,
    ) -> ApplyOutcome {
        if !self.is_current(ticket) {
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.page = self.completed_page;
                self.fetch_state = FetchState::Error(err.clone());
                return ApplyOutcome::Failed(err);
            }
        };

        let count = response.items.len();
        match ticket.kind {
            FetchKind::FirstPage => {
                self.query = Some(ticket.query.clone());
                self.results.replace(response.items);
                self.page = ticket.page;
                self.completed_page = ticket.page;
                self.total_available = response.total_available;

                if count == 0 {
                    self.exhausted = true;
                    self.fetch_state = FetchState::Empty;
                    ApplyOutcome::Empty
                } else {
                    self.exhausted = self.reached_total();
                    self.fetch_state = FetchState::Success;
                    ApplyOutcome::Replaced { count }
                }
            }
            FetchKind::NextPage => {
                self.completed_page = ticket.page;
                self.fetch_state = FetchState::Success;
                if response.total_available.is_some() {
                    self.total_available = response.total_available;
                }

                if count == 0 {
                    self.exhausted = true;
                    ApplyOutcome::EndOfResults
                } else {
                    self.results.append(response.items);
                    self.exhausted = self.reached_total();
                    ApplyOutcome::Appended { count }
                }
            }
        }
    }

    /// Returns true if `ticket` is the authoritative request right now.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.epoch == self.epoch && self.in_flight == Some(ticket.page)
    }

    /// Returns true if `load_more` would issue a request.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.query.is_some() && self.fetch_state == FetchState::Success && !self.exhausted
    }

    /// Returns false once the committed query is known to have no further
    /// pages, or when nothing is committed yet.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.query.is_some() && !self.exhausted
    }

    /// Returns the committed query, if any.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the most recent search intent, committed or not.
    #[must_use]
    pub fn intent(&self) -> Option<&Query> {
        self.intent.as_ref()
    }

    /// Returns the current page number.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Returns the configured page size.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the accumulated results.
    #[must_use]
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Returns the current fetch state.
    #[must_use]
    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    /// Returns the current request epoch.
    #[must_use]
    pub fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    /// Returns a snapshot for rendering.
    #[must_use]
    pub fn info(&self) -> PaginationInfo {
        PaginationInfo {
            page: self.page,
            item_count: self.results.len(),
            total_available: self.total_available,
            can_load_more: self.can_load_more(),
            is_loading: self.fetch_state.is_loading(),
        }
    }

    fn begin_search(&mut self, query: Query) -> FetchTicket {
        self.epoch = self.epoch.next();
        self.intent = Some(query.clone());
        self.page = PageNumber::FIRST;
        self.fetch_state = FetchState::Loading;
        self.in_flight = Some(PageNumber::FIRST);

        FetchTicket {
            epoch: self.epoch,
            query,
            page: PageNumber::FIRST,
            page_size: self.page_size,
            kind: FetchKind::FirstPage,
        }
    }

    fn reached_total(&self) -> bool {
        self.total_available
            .is_some_and(|total| self.results.len() as u64 >= total)
    }
}
