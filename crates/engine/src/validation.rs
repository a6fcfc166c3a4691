//! Field-scoped validation of form input.
//!
//! Runs on the client before any request is issued; the server accepts
//! whatever it is sent.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;

use crate::{BudgetPeriod, TransactionKind};

/// Raw transaction form input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionDraft {
    pub amount: Option<f64>,
    pub description: String,
    pub category: String,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
}

/// Raw budget form input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
}

/// Validation failures keyed by form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, &'static str>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.fields.insert(field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.fields.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, *message))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn positive(amount: Option<f64>) -> bool {
    amount.is_some_and(|value| value.is_finite() && value > 0.0)
}

pub fn validate_transaction(draft: &TransactionDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if !positive(draft.amount) {
        errors.add("amount", "Amount must be greater than 0");
    }
    if draft.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }
    if draft.category.trim().is_empty() {
        errors.add("category", "Category is required");
    }
    if draft.kind.is_none() {
        errors.add("type", "Transaction type is required");
    }
    if draft.date.is_none() {
        errors.add("date", "Date is required");
    }

    errors.into_result()
}

pub fn validate_budget(draft: &BudgetDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.category.trim().is_empty() {
        errors.add("category", "Category is required");
    }
    if !positive(draft.amount) {
        errors.add("amount", "Amount must be greater than 0");
    }
    if draft.period.is_none() {
        errors.add("period", "Period is required");
    }

    errors.into_result()
}
