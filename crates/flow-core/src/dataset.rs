//! Canonical in-memory dataset of trade records.
//!
//! Ordering is insertion-significant and newest-first at the head:
//! - incremental (poll) batches are **prepended**,
//! - paginated (load-more) batches are **appended**,
//! - full reloads **replace** the sequence wholesale.
//!
//! The store also tracks the pagination cursor (the `offset` of the next
//! page), the end-of-data flag, and the watermark (max creation timestamp
//! seen) used as the lower bound of the next incremental fetch.
//!
//! Records are not deduplicated. If the server's watermark query were
//! inclusive, an already-seen record would be prepended again.

use crate::record::TradeRecord;

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct DatasetStore {
    records: Vec<TradeRecord>,

    /// Offset of the next page to request.
    cursor: usize,

    /// Set once a page comes back short (or empty).
    end_of_data: bool,

    /// Max `creation_timestamp` seen; `None` until the first non-empty load.
    watermark: Option<i64>,

    page_size: usize,
}

impl Default for DatasetStore {
    fn default() -> Self {
        DatasetStore::new(DEFAULT_PAGE_SIZE)
    }
}

impl DatasetStore {
    pub fn new(page_size: usize) -> Self {
        DatasetStore {
            records: Vec::new(),
            cursor: 0,
            end_of_data: false,
            watermark: None,
            page_size,
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn end_of_data(&self) -> bool {
        self.end_of_data
    }

    pub fn watermark(&self) -> Option<i64> {
        self.watermark
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Forget pagination progress ahead of a full reload.
    ///
    /// Returns the `(cursor, end_of_data)` pair that was cleared so a
    /// reload that never merges can hand it back.
    pub fn reset_pagination(&mut self) -> (usize, bool) {
        let previous = (self.cursor, self.end_of_data);
        self.cursor = 0;
        self.end_of_data = false;
        previous
    }

    /// Put back pagination saved by [`DatasetStore::reset_pagination`].
    pub fn restore_pagination(&mut self, (cursor, end_of_data): (usize, bool)) {
        self.cursor = cursor;
        self.end_of_data = end_of_data;
    }

    /// Full reload: the dataset becomes exactly `records`.
    ///
    /// The watermark is recomputed from the new rows; an empty reload
    /// keeps the previous watermark so polling carries on.
    pub fn replace_all(&mut self, records: Vec<TradeRecord>) {
        self.cursor = records.len();
        self.end_of_data = records.len() < self.page_size;
        if let Some(newest) = max_creation(&records) {
            self.watermark = Some(newest);
        }
        self.records = records;
    }

    /// Insert an incremental batch at the head, preserving its order.
    ///
    /// The server returns newest-first, so the head stays newest-first.
    /// Cursor and end-of-data are untouched.
    pub fn prepend_new(&mut self, records: Vec<TradeRecord>) {
        if records.is_empty() {
            return;
        }
        self.observe(&records);
        self.records.splice(0..0, records);
    }

    /// Append the next page at the tail.
    pub fn append_more(&mut self, records: Vec<TradeRecord>) {
        if records.is_empty() {
            self.end_of_data = true;
            return;
        }
        self.cursor += records.len();
        self.end_of_data = records.len() < self.page_size;
        self.observe(&records);
        self.records.extend(records);
    }

    /// Fresh copy of the dataset narrowed by `search_term`.
    ///
    /// Case-insensitive substring match over symbol, details and
    /// call/put. An empty term returns everything.
    pub fn visible(&self, search_term: &str) -> Vec<TradeRecord> {
        let needle = search_term.to_lowercase();
        if needle.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|r| r.matches_search(&needle))
            .cloned()
            .collect()
    }

    fn observe(&mut self, records: &[TradeRecord]) {
        if let Some(newest) = max_creation(records) {
            self.watermark = Some(match self.watermark {
                Some(current) => current.max(newest),
                None => newest,
            });
        }
    }
}

/// Rows without a creation timestamp (decoded as 0) never set the watermark.
fn max_creation(records: &[TradeRecord]) -> Option<i64> {
    records
        .iter()
        .map(|r| r.creation_timestamp)
        .filter(|&ts| ts > 0)
        .max()
}
