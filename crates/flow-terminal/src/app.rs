// crates/flow-terminal/src/app.rs

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use flow_core::catalog::{self, CatalogOption};
use flow_core::{
    Completion, FetchError, FetchRequest, FilterSelection, RenderedTable, RequestKind, SyncConfig,
    SyncController, Timezone,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::network::FetchResponse;
use crate::settings::SettingsStore;

/// Moving the cursor within this many rows of the bottom asks for the next page.
pub const LOAD_MORE_MARGIN: usize = 5;

/// Rows skipped by PageUp / PageDown.
pub const PAGE_JUMP: usize = 10;

/// How long a status-bar notice stays up.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Filters,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Draft state of the filter panel. Edits only reach the controller on
/// Apply or Save.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    pub draft: FilterSelection,
    /// Index into the flattened catalog.
    pub cursor: usize,
}

impl FilterPanel {
    pub fn is_checked(&self, option: &CatalogOption) -> bool {
        self.draft.contains(option.name, option.value)
    }

    pub fn toggle_current(&mut self) {
        let Some((_, target)) = catalog::option_at(self.cursor) else {
            return;
        };
        let draft = &self.draft;
        self.draft = catalog::selection_where(|o| {
            let checked = draft.contains(o.name, o.value);
            if o == target {
                !checked
            } else {
                checked
            }
        });
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < catalog::option_count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

pub struct App {
    pub sync: SyncController,
    pub settings: SettingsStore,
    pub timezone: Timezone,

    // UI state
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub show_help: bool,
    pub selected_row: usize,
    pub search_input: String,
    pub filter_panel: FilterPanel,
    pub notice: Option<Notice>,

    // Statistics
    pub requests_sent: u64,
    pub responses_merged: u64,

    pub network_tx: Option<UnboundedSender<FetchRequest>>,
}

impl App {
    /// Build the app from persisted settings. A saved filter selection is
    /// re-projected onto the catalog; without one the defaults apply.
    pub fn new(config: SyncConfig, settings: SettingsStore) -> Self {
        let selection = settings
            .load_filters()
            .map(|saved| catalog::normalize(&saved))
            .unwrap_or_else(catalog::default_selection);
        let timezone = settings.load_timezone().unwrap_or_default();

        Self {
            filter_panel: FilterPanel {
                draft: selection.clone(),
                cursor: 0,
            },
            sync: SyncController::new(config, selection),
            settings,
            timezone,
            input_mode: InputMode::Normal,
            should_quit: false,
            show_help: false,
            selected_row: 0,
            search_input: String::new(),
            notice: None,
            requests_sent: 0,
            responses_merged: 0,
            network_tx: None,
        }
    }

    pub fn with_network(mut self, tx: UnboundedSender<FetchRequest>) -> Self {
        self.network_tx = Some(tx);
        self
    }

    /// Kick off the first load.
    pub fn start(&mut self, now: Instant) {
        info!("Initial load");
        let request = self.sync.initial_load(now);
        self.dispatch(request);
    }

    fn dispatch(&mut self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };
        debug!("Dispatching seq={} kind={:?} offset={}", request.seq, request.kind, request.offset);

        match &self.network_tx {
            Some(tx) => {
                if let Err(e) = tx.send(request) {
                    // The controller still holds the request; expiry releases it.
                    error!("Network worker unavailable: {}", e);
                } else {
                    self.requests_sent += 1;
                }
            }
            None => warn!("No network worker attached; seq={} dropped", request.seq),
        }
    }

    // -------------------------------------------------------------------------
    // Network events
    // -------------------------------------------------------------------------

    pub fn handle_response(&mut self, response: FetchResponse, now: Instant) {
        let visible_before = self.sync.visible().len();

        match self.sync.complete(response.seq, response.outcome) {
            Completion::Merged { kind, count } => {
                self.responses_merged += 1;
                debug!("Merged {:?} with {} records", kind, count);
                match kind {
                    RequestKind::Reload => self.selected_row = 0,
                    RequestKind::Poll if count > 0 && self.selected_row > 0 => {
                        // Keep the cursor on the same record as rows land above it.
                        let added = self.sync.visible().len().saturating_sub(visible_before);
                        self.selected_row += added;
                    }
                    RequestKind::Poll | RequestKind::LoadMore => {}
                }
            }
            Completion::Failed { kind, error } => {
                match &error {
                    FetchError::Transport(_) => error!("{:?} request failed: {}", kind, error),
                    _ => warn!("{:?} request failed: {}", kind, error),
                }
                self.show_error(error.to_string(), now);
            }
            Completion::Discarded { seq } => {
                warn!("Discarding stale response seq={}", seq);
            }
        }

        self.clamp_selection();
        let queued = self.sync.next_queued(now);
        self.dispatch(queued);
    }

    pub fn on_poll_tick(&mut self, now: Instant) {
        match self.sync.poll_tick(now) {
            Some(request) => self.dispatch(Some(request)),
            None => debug!("Poll tick skipped"),
        }
    }

    /// Housekeeping run every loop iteration.
    pub fn tick(&mut self, now: Instant) {
        if let Some(seq) = self.sync.expire_stale(now) {
            warn!("Request seq={} timed out", seq);
            self.show_error("Request timed out".to_string(), now);
        }
        let queued = self.sync.next_queued(now);
        self.dispatch(queued);

        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Table navigation
    // -------------------------------------------------------------------------

    pub fn view(&self) -> &RenderedTable {
        self.sync.view()
    }

    pub fn row_count(&self) -> usize {
        self.sync.view().len()
    }

    pub fn select_next(&mut self, now: Instant) {
        self.move_selection(1, now);
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn page_down(&mut self, now: Instant) {
        self.move_selection(PAGE_JUMP, now);
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(PAGE_JUMP);
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self, now: Instant) {
        self.selected_row = self.row_count().saturating_sub(1);
        self.maybe_load_more(now);
    }

    fn move_selection(&mut self, by: usize, now: Instant) {
        let last = self.row_count().saturating_sub(1);
        self.selected_row = (self.selected_row + by).min(last);
        self.maybe_load_more(now);
    }

    /// Ask for the next page once the cursor is near the bottom.
    pub fn maybe_load_more(&mut self, now: Instant) {
        let rows = self.row_count();
        if rows == 0 || self.selected_row + LOAD_MORE_MARGIN < rows {
            return;
        }
        let request = self.sync.load_more(now);
        self.dispatch(request);
    }

    pub fn is_loading_more(&self, now: Instant) -> bool {
        self.sync.is_loading_more(now)
    }

    fn clamp_selection(&mut self) {
        let last = self.row_count().saturating_sub(1);
        if self.selected_row > last {
            self.selected_row = last;
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        self.apply_search();
    }

    pub fn search_pop(&mut self) {
        self.search_input.pop();
        self.apply_search();
    }

    /// Leave the input, keeping the term.
    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave the input and drop the term.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.apply_search();
        self.input_mode = InputMode::Normal;
    }

    fn apply_search(&mut self) {
        self.sync.set_search(&self.search_input);
        self.selected_row = 0;
    }

    // -------------------------------------------------------------------------
    // Filter panel
    // -------------------------------------------------------------------------

    pub fn open_filters(&mut self) {
        self.filter_panel.draft = catalog::normalize(self.sync.selection());
        self.input_mode = InputMode::Filters;
    }

    /// Commit the draft and reload.
    pub fn apply_filters(&mut self, now: Instant) {
        let selection = self.filter_panel.draft.clone();
        info!("Applying filters");
        let request = self.sync.apply_filters(selection, now);
        self.dispatch(request);
        self.selected_row = 0;
        self.input_mode = InputMode::Normal;
    }

    /// Apply, then persist the selection.
    pub fn save_filters(&mut self, now: Instant) {
        self.apply_filters(now);
        match self.settings.save_filters(self.sync.selection()) {
            Ok(()) => self.show_info("Filters saved".to_string(), now),
            Err(e) => {
                error!("Failed to save filters: {}", e);
                self.show_error(format!("Could not save filters: {}", e), now);
            }
        }
    }

    /// Forget the saved selection and put the defaults back in the draft.
    /// The dataset is not refetched.
    pub fn reset_filters(&mut self, now: Instant) {
        if let Err(e) = self.settings.clear_filters() {
            error!("Failed to clear saved filters: {}", e);
        }
        self.filter_panel.draft = catalog::default_selection();
        self.sync.refresh();
        self.clamp_selection();
        self.show_info("Filters reset to defaults".to_string(), now);
    }

    pub fn cancel_filters(&mut self) {
        self.filter_panel.draft = self.sync.selection().clone();
        self.input_mode = InputMode::Normal;
    }

    // -------------------------------------------------------------------------
    // Timezone / status
    // -------------------------------------------------------------------------

    pub fn cycle_timezone(&mut self, now: Instant) {
        self.timezone = self.timezone.next();
        info!("Timezone set to {}", self.timezone.code());
        if let Err(e) = self.settings.save_timezone(self.timezone) {
            error!("Failed to save timezone: {}", e);
            self.show_error(format!("Could not save timezone: {}", e), now);
        }
    }

    pub fn clock_label(&self, now: DateTime<Utc>) -> String {
        self.timezone.clock_label(now)
    }

    pub fn show_info(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text,
            shown_at: now,
        });
    }

    pub fn show_error(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text,
            shown_at: now,
        });
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
