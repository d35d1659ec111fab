//! Monthly budget model
//!
//! A budget caps expense spending for one category in one month. Evaluating a
//! budget against the ledger produces a [`BudgetStatus`] with a [`Band`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::month::Month;

/// A spending ceiling for one (category, month) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: String,
    pub limit: Money,
    pub month: Month,
}

/// Classification of spend against a budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Under half of the limit used
    Healthy,
    /// Between 50% and 80% of the limit used
    Caution,
    /// At least 80% of the limit used
    Warning,
    /// Spending is above the limit
    Exceeded,
    /// Limit is zero so no ratio exists
    NotApplicable,
}

impl Band {
    /// Classify a budget from its remaining amount and usage percentage
    pub fn classify(remaining: Money, percent: Option<f64>) -> Self {
        if remaining.is_negative() {
            return Self::Exceeded;
        }
        match percent {
            None => Self::NotApplicable,
            Some(p) if p >= 80.0 => Self::Warning,
            Some(p) if p < 50.0 => Self::Healthy,
            Some(_) => Self::Caution,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthy => "healthy",
            Self::Caution => "caution",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
            Self::NotApplicable => "N/A",
        };
        f.write_str(label)
    }
}

/// A budget evaluated against the month's expenses
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    /// `spent / limit * 100`, absent when the limit is zero
    pub percent: Option<f64>,
    pub band: Band,
}

impl BudgetStatus {
    /// Evaluate `budget` given the amount spent in its category and month
    pub fn evaluate(budget: &Budget, spent: Money) -> Self {
        let remaining = budget.limit - spent;
        let percent = spent.percent_of(budget.limit);

        Self {
            category: budget.category.clone(),
            limit: budget.limit,
            spent,
            remaining,
            percent,
            band: Band::classify(remaining, percent),
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.band == Band::Exceeded
    }
}
