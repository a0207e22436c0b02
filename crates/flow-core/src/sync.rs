//! Sync controller: decides which fetch to issue and how to merge it.
//!
//! The controller is transport-agnostic. Triggers return a
//! [`FetchRequest`] (or `None` when gated); whoever performs the I/O hands
//! the outcome back through [`SyncController::complete`], tagged with the
//! request's `seq`.
//!
//! Ordering rules:
//! - At most one request is in flight. While it is outstanding, poll
//!   ticks are skipped, load-more is ignored, and a filter apply is
//!   queued until [`SyncController::next_queued`] can issue it.
//! - Only the response for the in-flight `seq` is ever merged. Anything
//!   else (e.g. a late answer to an expired request) is discarded, so a
//!   stale response can neither move the watermark nor duplicate a page.
//! - Load-more is additionally debounced by a fixed window. The window
//!   only spaces out requests; a load-more whose response never arrives
//!   keeps the gate closed until [`SyncController::expire_stale`] drops it.

use std::time::{Duration, Instant};

use crate::dataset::{DatasetStore, DEFAULT_PAGE_SIZE};
use crate::error::{FetchError, FetchOutcome};
use crate::filter::{to_query_filter, FilterSelection, QueryFilter};
use crate::record::TradeRecord;
use crate::render::{render, RenderedTable};

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub page_size: usize,
    pub load_more_debounce: Duration,
    /// In-flight requests older than this are expired.
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            page_size: DEFAULT_PAGE_SIZE,
            load_more_debounce: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Which merge a request's response feeds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Initial load / filter change -> `replace_all`.
    Reload,
    /// Next page -> `append_more`.
    LoadMore,
    /// Incremental poll -> `prepend_new`.
    Poll,
}

/// One request to send to the trade endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub kind: RequestKind,
    pub offset: usize,
    pub limit: usize,
    pub filter: QueryFilter,
}

/// What happened when a response was handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Records were merged (possibly zero of them).
    Merged { kind: RequestKind, count: usize },
    /// The fetch failed; the dataset was left untouched.
    Failed { kind: RequestKind, error: FetchError },
    /// Not the in-flight request; ignored.
    Discarded { seq: u64 },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    kind: RequestKind,
    issued_at: Instant,
    /// `(cursor, end_of_data)` from before a reload reset them.
    saved_pagination: Option<(usize, bool)>,
}

#[derive(Debug)]
pub struct SyncController {
    config: SyncConfig,
    store: DatasetStore,
    selection: FilterSelection,
    search_term: String,

    next_seq: u64,
    in_flight: Option<InFlight>,
    reload_pending: bool,
    /// Load-more is refused until this instant.
    load_more_until: Option<Instant>,
    /// A reload has completed at least once; paging before that is pointless.
    loaded: bool,

    visible: Vec<TradeRecord>,
    view: RenderedTable,
}

impl SyncController {
    pub fn new(config: SyncConfig, selection: FilterSelection) -> Self {
        let store = DatasetStore::new(config.page_size);
        SyncController {
            config,
            store,
            selection,
            search_term: String::new(),
            next_seq: 1,
            in_flight: None,
            reload_pending: false,
            load_more_until: None,
            loaded: false,
            visible: Vec::new(),
            view: render(&[]),
        }
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// First fetch with the current selection.
    pub fn initial_load(&mut self, now: Instant) -> Option<FetchRequest> {
        self.request_reload(now)
    }

    /// Switch to `selection` and reload from offset 0.
    ///
    /// If a request is in flight the reload is queued; fetch it with
    /// [`SyncController::next_queued`] after the outstanding response.
    pub fn apply_filters(&mut self, selection: FilterSelection, now: Instant) -> Option<FetchRequest> {
        self.selection = selection;
        self.request_reload(now)
    }

    /// Fetch the next page, unless gated.
    ///
    /// The debounce window only spaces requests out. A load-more that
    /// never gets a response holds the in-flight gate until
    /// [`SyncController::expire_stale`] releases it.
    pub fn load_more(&mut self, now: Instant) -> Option<FetchRequest> {
        if !self.loaded || self.store.end_of_data() || self.in_flight.is_some() || self.reload_pending {
            return None;
        }
        if self.is_loading_more(now) {
            return None;
        }
        self.load_more_until = Some(now + self.config.load_more_debounce);
        Some(self.issue(RequestKind::LoadMore, now))
    }

    /// Incremental fetch above the watermark, unless gated.
    ///
    /// Returns `None` before the first watermark exists and whenever
    /// another request is still outstanding (the tick is skipped).
    pub fn poll_tick(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.store.watermark().is_none() || self.in_flight.is_some() || self.reload_pending {
            return None;
        }
        Some(self.issue(RequestKind::Poll, now))
    }

    /// Issue a reload that was queued behind an in-flight request.
    pub fn next_queued(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.reload_pending && self.in_flight.is_none() {
            return Some(self.start_reload(now));
        }
        None
    }

    /// Drop an in-flight request that has outlived the request timeout.
    ///
    /// Returns the expired `seq`; its response, if it ever shows up, will
    /// be discarded.
    pub fn expire_stale(&mut self, now: Instant) -> Option<u64> {
        let flight = self.in_flight?;
        if now.saturating_duration_since(flight.issued_at) >= self.config.request_timeout {
            self.in_flight = None;
            self.abandon(flight);
            return Some(flight.seq);
        }
        None
    }

    // -------------------------------------------------------------------------
    // Completion
    // -------------------------------------------------------------------------

    /// Hand back the outcome of request `seq`.
    pub fn complete(&mut self, seq: u64, outcome: FetchOutcome) -> Completion {
        let flight = match self.in_flight {
            Some(flight) if flight.seq == seq => flight,
            _ => return Completion::Discarded { seq },
        };
        let kind = flight.kind;
        self.in_flight = None;

        let records = match outcome {
            Ok(records) => records,
            Err(error) => {
                self.abandon(flight);
                return Completion::Failed { kind, error };
            }
        };
        let count = records.len();

        match kind {
            RequestKind::Reload => {
                self.store.replace_all(records);
                self.loaded = true;
            }
            RequestKind::LoadMore => self.store.append_more(records),
            RequestKind::Poll => self.store.prepend_new(records),
        }

        if count > 0 || kind != RequestKind::Poll {
            self.refresh();
        }

        Completion::Merged { kind, count }
    }

    // -------------------------------------------------------------------------
    // Search / view
    // -------------------------------------------------------------------------

    /// Update the in-memory search and re-project the view.
    pub fn set_search(&mut self, term: &str) {
        if self.search_term != term {
            self.search_term = term.to_string();
            self.refresh();
        }
    }

    /// Recompute the visible projection and the rendered table.
    pub fn refresh(&mut self) {
        self.visible = self.store.visible(&self.search_term);
        self.view = render(&self.visible);
    }

    pub fn view(&self) -> &RenderedTable {
        &self.view
    }

    pub fn visible(&self) -> &[TradeRecord] {
        &self.visible
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn in_flight(&self) -> Option<(u64, RequestKind)> {
        self.in_flight.map(|f| (f.seq, f.kind))
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// Is the load-more debounce window still open?
    pub fn is_loading_more(&self, now: Instant) -> bool {
        self.load_more_until.map(|until| now < until).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn request_reload(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            self.reload_pending = true;
            return None;
        }
        Some(self.start_reload(now))
    }

    fn start_reload(&mut self, now: Instant) -> FetchRequest {
        self.reload_pending = false;
        let saved = self.store.reset_pagination();
        let request = self.issue(RequestKind::Reload, now);
        if let Some(flight) = self.in_flight.as_mut() {
            flight.saved_pagination = Some(saved);
        }
        request
    }

    /// A reload that will never merge hands back the pagination of the rows
    /// still on screen, so the next load-more continues from there.
    fn abandon(&mut self, flight: InFlight) {
        if let Some(saved) = flight.saved_pagination {
            self.store.restore_pagination(saved);
        }
    }

    fn issue(&mut self, kind: RequestKind, now: Instant) -> FetchRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(InFlight {
            seq,
            kind,
            issued_at: now,
            saved_pagination: None,
        });

        let mut filter = to_query_filter(&self.selection);
        let offset = match kind {
            RequestKind::LoadMore => self.store.cursor(),
            RequestKind::Reload | RequestKind::Poll => 0,
        };
        if kind == RequestKind::Poll {
            filter.since_creation = self.store.watermark().map(|w| w.to_string());
        }

        FetchRequest {
            seq,
            kind,
            offset,
            limit: self.config.page_size,
            filter,
        }
    }
}
