// crates/flow-terminal/tests/app_flow.rs
//
// Drives the app the way the event loop does, with a channel standing in
// for the network worker.

use std::time::{Duration, Instant};

use flow_core::catalog::default_selection;
use flow_core::{FetchError, FetchRequest, FilterOption, FilterSelection, RequestKind, SyncConfig, Timezone, TradeRecord};
use flow_terminal::app::{App, InputMode, NoticeKind};
use flow_terminal::network::FetchResponse;
use flow_terminal::settings::{SettingsStore, FILTERS_KEY, TIMEZONE_KEY};
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn rec(symbol: &str, created: i64) -> TradeRecord {
    TradeRecord {
        symbol: symbol.to_string(),
        creation_timestamp: created,
        ..Default::default()
    }
}

fn page(prefix: &str, n: usize, first_ts: i64) -> Vec<TradeRecord> {
    (0..n)
        .map(|i| rec(&format!("{}{}", prefix, i), first_ts - i as i64))
        .collect()
}

fn app_with(settings: SettingsStore) -> (App, UnboundedReceiver<FetchRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(SyncConfig::default(), settings).with_network(tx);
    (app, rx)
}

fn next_request(rx: &mut UnboundedReceiver<FetchRequest>) -> FetchRequest {
    rx.try_recv().expect("a request was dispatched")
}

fn reply(app: &mut App, req: &FetchRequest, records: Vec<TradeRecord>, now: Instant) {
    app.handle_response(
        FetchResponse {
            seq: req.seq,
            outcome: Ok(records),
        },
        now,
    );
}

/// App with the first 100 rows loaded.
fn loaded_app(now: Instant) -> (App, UnboundedReceiver<FetchRequest>) {
    let (mut app, mut rx) = app_with(SettingsStore::in_memory());
    app.start(now);
    let req = next_request(&mut rx);
    reply(&mut app, &req, page("P", 100, 10_000), now);
    (app, rx)
}

#[test]
fn starts_with_defaults_and_loads_first_page() {
    let t0 = Instant::now();
    let (mut app, mut rx) = app_with(SettingsStore::in_memory());

    assert_eq!(app.sync.selection(), &default_selection());
    assert_eq!(app.timezone, Timezone::Est);

    app.start(t0);
    let req = next_request(&mut rx);
    assert_eq!(req.kind, RequestKind::Reload);
    assert_eq!((req.offset, req.limit), (0, 100));
    assert_eq!(req.filter.option_type, vec!["CALL".to_string(), "PUT".to_string()]);

    reply(&mut app, &req, page("P", 100, 10_000), t0);
    assert_eq!(app.row_count(), 100);
    assert_eq!(app.view().title, "OPTIONS (100) > ALL");
    assert_eq!(app.requests_sent, 1);
}

#[test]
fn saved_preferences_are_restored() {
    let mut settings = SettingsStore::in_memory();
    let mut saved = FilterSelection::new();
    saved.push("Option Type", FilterOption::new("cp", "put"));
    saved.push("Old Group", FilterOption::new("gone", "option"));
    settings.save_filters(&saved).unwrap();
    settings.save_timezone(Timezone::Mst).unwrap();

    let (app, _rx) = app_with(settings);

    let selection = app.sync.selection();
    assert!(selection.contains("cp", "put"));
    assert!(!selection.contains("cp", "call"));
    assert!(!selection.contains("gone", "option"));
    assert_eq!(app.timezone, Timezone::Mst);
}

#[test]
fn cursor_near_bottom_loads_next_page() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);

    // Far from the bottom: nothing.
    app.select_next(t0);
    assert!(rx.try_recv().is_err());

    app.select_last(t0);
    let req = next_request(&mut rx);
    assert_eq!(req.kind, RequestKind::LoadMore);
    assert_eq!(req.offset, 100);
    assert!(app.is_loading_more(t0));

    // Still in flight and debounced.
    app.select_next(t0);
    assert!(rx.try_recv().is_err());

    reply(&mut app, &req, page("Q", 100, 9_000), t0);
    assert_eq!(app.row_count(), 200);
    assert!(!app.is_loading_more(t0 + Duration::from_millis(500)));
}

#[test]
fn poll_prepends_and_keeps_cursor_on_the_same_row() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);
    app.selected_row = 50;
    let anchored = app.view().rows[50].cells[1].clone();

    app.on_poll_tick(t0);
    let req = next_request(&mut rx);
    assert_eq!(req.kind, RequestKind::Poll);
    assert_eq!(req.filter.since_creation.as_deref(), Some("10000"));

    // A second tick while the poll is outstanding is skipped.
    app.on_poll_tick(t0);
    assert!(rx.try_recv().is_err());

    reply(&mut app, &req, vec![rec("N1", 10_002), rec("N0", 10_001)], t0);
    assert_eq!(app.row_count(), 102);
    assert_eq!(app.view().rows[0].cells[1], "N1");
    assert_eq!(app.selected_row, 52);
    assert_eq!(app.view().rows[app.selected_row].cells[1], anchored);
}

#[test]
fn filter_apply_during_flight_is_queued() {
    let t0 = Instant::now();
    let (mut app, mut rx) = app_with(SettingsStore::in_memory());
    app.start(t0);
    let first = next_request(&mut rx);

    app.open_filters();
    assert_eq!(app.input_mode, InputMode::Filters);
    // Cursor 0 is "Calls".
    app.filter_panel.toggle_current();
    app.apply_filters(t0);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(rx.try_recv().is_err());

    reply(&mut app, &first, page("P", 100, 10_000), t0);
    let queued = next_request(&mut rx);
    assert_eq!(queued.kind, RequestKind::Reload);
    assert_eq!(queued.offset, 0);
    assert_eq!(queued.filter.option_type, vec!["PUT".to_string()]);
}

#[test]
fn save_persists_and_reset_restores_defaults_without_refetch() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);

    app.open_filters();
    app.filter_panel.toggle_current();
    app.save_filters(t0);
    let req = next_request(&mut rx);
    assert_eq!(req.kind, RequestKind::Reload);
    assert!(app.settings.get(FILTERS_KEY).is_some());
    assert!(matches!(app.notice.as_ref().map(|n| &n.kind), Some(NoticeKind::Info)));

    reply(&mut app, &req, page("R", 10, 20_000), t0);

    app.open_filters();
    app.reset_filters(t0);
    assert_eq!(app.settings.get(FILTERS_KEY), None);
    assert_eq!(app.filter_panel.draft, default_selection());
    assert!(rx.try_recv().is_err());
    assert_eq!(app.row_count(), 10);
}

#[test]
fn cancel_discards_the_draft() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);

    app.open_filters();
    app.filter_panel.toggle_current();
    app.cancel_filters();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.sync.selection(), &default_selection());
    assert!(rx.try_recv().is_err());
}

#[test]
fn failures_show_a_notice_and_leave_rows_alone() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);

    app.on_poll_tick(t0);
    let req = next_request(&mut rx);
    app.handle_response(
        FetchResponse {
            seq: req.seq,
            outcome: Err(FetchError::Application {
                code: 500,
                message: "query failed".into(),
            }),
        },
        t0,
    );

    assert_eq!(app.row_count(), 100);
    let notice = app.notice.as_ref().expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("query failed"));

    // Notices fade.
    app.tick(t0 + Duration::from_secs(5));
    assert!(app.notice.is_none());
}

#[test]
fn stalled_request_expires_and_late_answer_is_dropped() {
    let t0 = Instant::now();
    let (mut app, mut rx) = loaded_app(t0);

    app.on_poll_tick(t0);
    let stalled = next_request(&mut rx);

    app.tick(t0 + Duration::from_secs(11));
    assert_eq!(app.sync.in_flight(), None);

    reply(&mut app, &stalled, vec![rec("LATE", 99_999)], t0 + Duration::from_secs(12));
    assert_eq!(app.row_count(), 100);
    assert_eq!(app.sync.store().watermark(), Some(10_000));
}

#[test]
fn search_narrows_the_view() {
    let t0 = Instant::now();
    let (mut app, mut rx) = app_with(SettingsStore::in_memory());
    app.start(t0);
    let req = next_request(&mut rx);
    reply(
        &mut app,
        &req,
        vec![rec("SPY", 3), rec("QQQ", 2), rec("SPX", 1)],
        t0,
    );

    app.begin_search();
    app.search_push('s');
    app.search_push('p');
    assert_eq!(app.row_count(), 2);
    assert_eq!(app.view().title, "OPTIONS (2) > ALL");

    app.search_pop();
    app.search_pop();
    assert_eq!(app.row_count(), 3);

    app.search_push('q');
    app.end_search();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.row_count(), 1);

    app.begin_search();
    app.clear_search();
    assert_eq!(app.row_count(), 3);
}

#[test]
fn timezone_cycles_and_persists() {
    let t0 = Instant::now();
    let (mut app, _rx) = app_with(SettingsStore::in_memory());

    app.cycle_timezone(t0);
    assert_eq!(app.timezone, Timezone::Pst);
    assert_eq!(app.settings.get(TIMEZONE_KEY), Some("PST"));

    for _ in 0..4 {
        app.cycle_timezone(t0);
    }
    assert_eq!(app.timezone, Timezone::Est);
}
