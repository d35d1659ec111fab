//! Display formatting for terminal output
//!
//! Renders ledger data as tables. Colors and the currency symbol come from a
//! [`Theme`] built from the user's settings.

pub mod budget;
pub mod category;
pub mod report;
pub mod transaction;

pub use budget::format_budget_status;
pub use category::format_category_table;
pub use report::{format_statistics, format_summary};
pub use transaction::{format_transaction_details, format_transaction_table};

use colored::{ColoredString, Colorize};

use crate::config::settings::Settings;
use crate::models::{Band, Money, TransactionKind};

/// Presentation settings for one command invocation
#[derive(Debug, Clone)]
pub struct Theme {
    symbol: String,
    color: bool,
}

impl Theme {
    pub fn new(symbol: impl Into<String>, color: bool) -> Self {
        Self {
            symbol: symbol.into(),
            color,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.currency_symbol.clone(), settings.color)
    }

    /// Uncolored theme, used for tests and piped output
    pub fn plain() -> Self {
        Self::new("$", false)
    }

    /// `$12.50`, `-$12.50`
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.symbol)
    }

    /// Amount prefixed with the direction of `kind`: `+$10.00` or `-$10.00`
    pub fn directed(&self, amount: Money, kind: TransactionKind) -> String {
        let text = match kind {
            TransactionKind::Income => format!("+{}", self.money(amount)),
            TransactionKind::Expense => format!("-{}", self.money(amount)),
        };
        self.kind(text, kind)
    }

    /// Color `text` the way amounts of `kind` are shown
    pub fn kind(&self, text: impl Into<String>, kind: TransactionKind) -> String {
        match kind {
            TransactionKind::Income => self.paint(text, |s| s.green()),
            TransactionKind::Expense => self.paint(text, |s| s.red()),
        }
    }

    /// Color `text` by budget band
    pub fn band(&self, text: impl Into<String>, band: Band) -> String {
        match band {
            Band::Healthy => self.paint(text, |s| s.green()),
            Band::Caution => self.paint(text, |s| s.yellow()),
            Band::Warning => self.paint(text, |s| s.bright_yellow().bold()),
            Band::Exceeded => self.paint(text, |s| s.red().bold()),
            Band::NotApplicable => text.into(),
        }
    }

    pub fn neutral(&self, text: impl Into<String>) -> String {
        self.paint(text, |s| s.cyan())
    }

    pub fn header(&self, text: impl Into<String>) -> String {
        self.paint(text, |s| s.bold())
    }

    pub fn warning(&self, text: impl Into<String>) -> String {
        self.paint(text, |s| s.yellow())
    }

    pub fn success(&self, text: impl Into<String>) -> String {
        self.paint(text, |s| s.green())
    }

    pub fn error(&self, text: impl Into<String>) -> String {
        self.paint(text, |s| s.red())
    }

    fn paint(&self, text: impl Into<String>, style: impl FnOnce(&str) -> ColoredString) -> String {
        let text = text.into();
        if self.color {
            style(&text).to_string()
        } else {
            text
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_has_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(
            theme.directed(Money::from_cents(1050), TransactionKind::Expense),
            "-$10.50"
        );
        assert_eq!(
            theme.directed(Money::from_cents(1050), TransactionKind::Income),
            "+$10.50"
        );
        assert_eq!(theme.band("over", Band::Exceeded), "over");
    }

    #[test]
    fn test_custom_symbol() {
        let theme = Theme::new("€", false);
        assert_eq!(theme.money(Money::from_cents(-250)), "-€2.50");
    }
}
