//! Display timezones for the status clock.
//!
//! These are fixed offsets (no daylight saving), matching the labels the
//! user picks from.

use chrono::{DateTime, FixedOffset, Offset, Utc};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Timezone {
    #[default]
    Est,
    Pst,
    Cst,
    Mst,
    Utc,
}

impl Timezone {
    pub const ALL: [Timezone; 5] = [
        Timezone::Est,
        Timezone::Pst,
        Timezone::Cst,
        Timezone::Mst,
        Timezone::Utc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Timezone::Est => "EST",
            Timezone::Pst => "PST",
            Timezone::Cst => "CST",
            Timezone::Mst => "MST",
            Timezone::Utc => "UTC",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Timezone::Est => "Eastern Standard Time (UTC-5)",
            Timezone::Pst => "Pacific Standard Time (UTC-8)",
            Timezone::Cst => "Central Standard Time (UTC-6)",
            Timezone::Mst => "Mountain Standard Time (UTC-7)",
            Timezone::Utc => "UTC Time",
        }
    }

    /// Parse a stored code (`"EST"`, `"PST"`, ...). Case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Timezone::ALL.into_iter().find(|tz| tz.code() == code)
    }

    pub fn offset_hours(self) -> i32 {
        match self {
            Timezone::Est => -5,
            Timezone::Pst => -8,
            Timezone::Cst => -6,
            Timezone::Mst => -7,
            Timezone::Utc => 0,
        }
    }

    pub fn offset(self) -> FixedOffset {
        FixedOffset::east_opt(self.offset_hours() * 3600).unwrap_or_else(|| Utc.fix())
    }

    /// Next zone in the cycle used by the timezone hotkey.
    pub fn next(self) -> Self {
        let idx = Timezone::ALL.iter().position(|&tz| tz == self).unwrap_or(0);
        Timezone::ALL[(idx + 1) % Timezone::ALL.len()]
    }

    /// Status line: `Updated: 2025-03-07 09:30:00 EST`.
    pub fn clock_label(self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&self.offset());
        format!("Updated: {} {}", local.format("%Y-%m-%d %H:%M:%S"), self.code())
    }
}
