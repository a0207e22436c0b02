//! The fixed set of filter groups shown in the filter panel, and the
//! default selection used when nothing has been saved.

use crate::filter::{FilterOption, FilterSelection, PRE_VALUE_NAME};

/// One checkbox in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub name: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

/// A titled group of checkboxes.
#[derive(Debug, Clone, Copy)]
pub struct CatalogGroup {
    pub title: &'static str,
    pub options: &'static [CatalogOption],
}

const fn opt(name: &'static str, value: &'static str, label: &'static str) -> CatalogOption {
    CatalogOption { name, value, label }
}

pub static FILTER_GROUPS: &[CatalogGroup] = &[
    CatalogGroup {
        title: "Option Type",
        options: &[opt("cp", "call", "Calls"), opt("cp", "put", "Puts")],
    },
    CatalogGroup {
        title: "Flow Color",
        options: &[
            opt("color", "yellow", "Yellow"),
            opt("color", "white", "White"),
            opt("color", "magenta", "Magenta"),
        ],
    },
    CatalogGroup {
        title: "Security Type",
        options: &[opt("security", "stock", "Stock"), opt("security", "etf", "ETF")],
    },
    CatalogGroup {
        title: "Bid/Ask",
        options: &[
            opt("bid_ask", "AA", "Above Ask"),
            opt("bid_ask", "A", "At Ask"),
            opt("bid_ask", "B", "At Bid"),
            opt("bid_ask", "BB", "Below Bid"),
        ],
    },
    CatalogGroup {
        title: "Premium",
        options: &[
            opt(PRE_VALUE_NAME, "50000", "Above $50K"),
            opt(PRE_VALUE_NAME, "100000", "Above $100K"),
            opt(PRE_VALUE_NAME, "200000", "Above $200K"),
            opt(PRE_VALUE_NAME, "500000", "Above $500K"),
            opt(PRE_VALUE_NAME, "1000000", "Above $1M"),
        ],
    },
    CatalogGroup {
        title: "Flags",
        options: &[
            opt("flag", "lt$0.75", "Market Cap < $750B"),
            opt("flag", "in-the-money", "In The Money"),
            opt("flag", "out-the-money", "Out The Money"),
            opt("flag", "sweep-only", "Sweeps Only"),
            opt("flag", "weekly-only", "Weeklies Only"),
            opt("flag", "earnings", "Earnings"),
            opt("flag", "unusual", "Unusual Activity"),
        ],
    },
    CatalogGroup {
        title: "Sector",
        options: &[
            opt("sector", "consumer-discretionary", "Consumer Discretionary"),
            opt("sector", "industrials", "Industrials"),
            opt("sector", "information-technology", "Information Technology"),
            opt("sector", "real-estate", "Real Estate"),
            opt("sector", "health-care", "Health Care"),
            opt("sector", "energy", "Energy"),
            opt("sector", "financials", "Financials"),
            opt("sector", "materials", "Materials"),
            opt("sector", "consumer-staples", "Consumer Staples"),
            opt("sector", "communication-services", "Communication Services"),
            opt("sector", "utilities", "Utilities"),
        ],
    },
];

/// Values checked when no saved selection exists (or after Reset).
pub const DEFAULT_CHECKED: [&str; 20] = [
    "put",
    "call",
    "yellow",
    "white",
    "magenta",
    "AA",
    "A",
    "etf",
    "stock",
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

/// Total number of checkboxes across all groups.
pub fn option_count() -> usize {
    FILTER_GROUPS.iter().map(|g| g.options.len()).sum()
}

/// Locate the `index`-th checkbox (flattened across groups).
pub fn option_at(index: usize) -> Option<(&'static CatalogGroup, &'static CatalogOption)> {
    FILTER_GROUPS
        .iter()
        .flat_map(|g| g.options.iter().map(move |o| (g, o)))
        .nth(index)
}

/// Build a selection from a predicate over the catalog, keeping every
/// group (possibly empty) in panel order.
pub fn selection_where(mut checked: impl FnMut(&CatalogOption) -> bool) -> FilterSelection {
    let mut selection = FilterSelection::new();
    for group in FILTER_GROUPS {
        let options = group
            .options
            .iter()
            .filter(|o| checked(o))
            .map(|o| FilterOption::new(o.name, o.value))
            .collect();
        selection.set_group(group.title, options);
    }
    selection
}

pub fn default_selection() -> FilterSelection {
    selection_where(|o| DEFAULT_CHECKED.contains(&o.value))
}

/// Re-project a (possibly stale) saved selection onto the catalog.
///
/// Options that no longer exist as checkboxes are dropped, matching what
/// re-checking the boxes from storage would produce.
pub fn normalize(saved: &FilterSelection) -> FilterSelection {
    selection_where(|o| saved.contains(o.name, o.value))
}
