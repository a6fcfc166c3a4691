//! Transaction primitives.
//!
//! A `Transaction` is a single recorded income or expense event. The engine
//! only ever sees transactions that were already read back from the store, so
//! construction never fails.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Money,
    pub description: Option<String>,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: Money,
        description: Option<String>,
        category: impl Into<String>,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description,
            category: category.into(),
            kind,
            date,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// `true` if the transaction date falls in the given 1-based calendar month.
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}
