//! Budget primitives.

use serde::{Deserialize, Serialize};

use crate::Money;

/// Nominal scope of a budget.
///
/// Advisory only: every comparison uses the current calendar month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

/// A spending ceiling for a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: Money,
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount,
            period,
        }
    }
}
