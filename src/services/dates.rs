//! Flexible date input
//!
//! Turns the date strings people type on the command line ("2024-03-05",
//! "3/5", "yesterday", "last 10") into calendar dates. Normalization never
//! fails: unrecognised input resolves to today.

use chrono::{Datelike, Days, Local, NaiveDate};

/// Exact formats tried in order, flagged when they carry no year. The first
/// match wins, so `MM/DD` beats `DD/MM` for ambiguous input.
const FORMATS: [(&str, bool); 5] = [
    ("%Y-%m-%d", false),
    ("%m/%d/%Y", false),
    ("%m/%d", true),
    ("%d/%m/%Y", false),
    ("%d/%m", true),
];

/// Parses date expressions relative to a fixed "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    today: NaiveDate,
}

impl DateNormalizer {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// A normalizer anchored to the local calendar date
    pub fn local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve `input` to a date
    pub fn normalize(&self, input: &str) -> NaiveDate {
        let input = input.trim();

        if let Some(date) = self.parse_exact(input) {
            return date;
        }

        let lowered = input.to_lowercase();
        match lowered.as_str() {
            "today" => return self.today,
            "yesterday" => return self.days_ago(1),
            _ => {}
        }

        let mut words = lowered.split_whitespace();
        if words.next() == Some("last") {
            if let Some(days) = words.next().and_then(|n| n.parse::<u64>().ok()) {
                return self.days_ago(days);
            }
        }

        tracing::debug!(input, today = %self.today, "unrecognised date input, using today");
        self.today
    }

    fn parse_exact(&self, input: &str) -> Option<NaiveDate> {
        // Year-less forms take the year of `today`
        let with_year = format!("{}/{}", input, self.today.year());

        FORMATS.iter().find_map(|(format, yearless)| {
            if *yearless {
                NaiveDate::parse_from_str(&with_year, &format!("{format}/%Y")).ok()
            } else {
                NaiveDate::parse_from_str(input, format).ok()
            }
        })
    }

    fn days_ago(&self, days: u64) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::local()
    }
}
