//! flow-core
//!
//! Pure option-flow synchronization logic:
//! - trade records and display formatting
//! - filter selection and its translation to the server query
//! - the dataset store (replace / prepend / append merges)
//! - the sync controller that gates and orders fetches
//! - the row projection the terminal draws from

pub mod record;
pub mod format;
pub mod filter;
pub mod catalog;
pub mod dataset;
pub mod render;
pub mod sync;
pub mod timezone;
pub mod error;

pub use record::{CallPut, FlowColor, TradeRecord};

pub use filter::{to_query_filter, FilterOption, FilterSelection, QueryFilter};

pub use dataset::{DatasetStore, DEFAULT_PAGE_SIZE};
pub use render::{render, CpTint, RenderedRow, RenderedTable, RowStyle};
pub use sync::{Completion, FetchRequest, RequestKind, SyncConfig, SyncController};
pub use timezone::Timezone;
pub use error::{FetchError, FetchOutcome};
