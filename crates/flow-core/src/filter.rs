//! Filter selection (UI side) and its translation into the server-facing
//! query filter.
//!
//! The selection is what the filter panel holds and what gets persisted;
//! the [`QueryFilter`] is rebuilt from it on every fetch and never stored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One checked checkbox: its input `name` and `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub name: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        FilterOption {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Group name -> checked options, in panel order.
///
/// Serializes to the same shape it is persisted under:
/// `{"Option Type": [{"name": "cp", "value": "put"}, ...], ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    groups: IndexMap<String, Vec<FilterOption>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        FilterSelection::default()
    }

    /// Replace the checked options of `group`.
    pub fn set_group(&mut self, group: impl Into<String>, options: Vec<FilterOption>) {
        self.groups.insert(group.into(), options);
    }

    /// Add one checked option to `group`, creating the group if needed.
    pub fn push(&mut self, group: impl Into<String>, option: FilterOption) {
        self.groups.entry(group.into()).or_default().push(option);
    }

    pub fn group(&self, group: &str) -> Option<&[FilterOption]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Is `(name, value)` checked in any group?
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.options().any(|o| o.name == name && o.value == value)
    }

    /// All checked options, group order first, then option order.
    pub fn options(&self) -> impl Iterator<Item = &FilterOption> {
        self.groups.values().flatten()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &Vec<FilterOption>)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

/// Server-facing query filter.
///
/// Empty arrays and unset flags are omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flow_color: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sector: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bid_ask: Vec<String>,
    /// Premium floors; the server uses the smallest one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_value: Vec<String>,

    #[serde(rename = "marketCapAbove750B", default, skip_serializing_if = "is_false")]
    pub market_cap_above_750b: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub in_the_money: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub out_the_money: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sweep_only: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub weekly_only: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub earnings: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unusual: bool,

    /// Incremental watermark: only rows created after this are returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_creation: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Option name that routes straight into [`QueryFilter::pre_value`].
pub const PRE_VALUE_NAME: &str = "pre_value";

/// Sector slugs understood by the server.
pub const SECTOR_SLUGS: [&str; 11] = [
    "consumer-discretionary",
    "industrials",
    "information-technology",
    "real-estate",
    "health-care",
    "energy",
    "financials",
    "materials",
    "consumer-staples",
    "communication-services",
    "utilities",
];

/// Translate a UI selection into the server-facing filter.
///
/// Unknown option values are ignored so newer panels keep working
/// against this translator.
pub fn to_query_filter(selection: &FilterSelection) -> QueryFilter {
    let mut filter = QueryFilter::default();

    for option in selection.options() {
        let value = option.value.as_str();

        if option.name == PRE_VALUE_NAME {
            filter.pre_value.push(value.to_string());
            continue;
        }

        match value {
            "put" | "call" => filter.option_type.push(value.to_uppercase()),
            "yellow" | "white" | "magenta" => filter.flow_color.push(value.to_uppercase()),
            "etf" | "stock" => filter.security_type.push(value.to_uppercase()),
            "AA" | "BB" | "A" | "B" => filter.bid_ask.push(value.to_string()),
            "lt$0.75" => filter.market_cap_above_750b = true,
            "in-the-money" => filter.in_the_money = true,
            "out-the-money" => filter.out_the_money = true,
            "sweep-only" => filter.sweep_only = true,
            "weekly-only" => filter.weekly_only = true,
            "earnings" => filter.earnings = true,
            "unusual" => filter.unusual = true,
            slug if SECTOR_SLUGS.contains(&slug) => filter.sector.push(sector_title(slug)),
            _ => {}
        }
    }

    filter
}

/// `information-technology` -> `Information Technology`.
pub fn sector_title(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
