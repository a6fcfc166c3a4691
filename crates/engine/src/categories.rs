//! Suggested category sets.
//!
//! Categories are free text: the sets below drive form suggestions only and
//! nothing rejects a category outside of them.

use crate::TransactionKind;

pub const EXPENSE_CATEGORIES: [&str; 13] = [
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Personal Care",
    "Groceries",
    "Rent",
    "Insurance",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 10] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Rental Income",
    "Gift",
    "Bonus",
    "Refund",
    "Side Hustle",
    "Other Income",
];

/// Suggested categories for a transaction type.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
        TransactionKind::Income => &INCOME_CATEGORIES,
    }
}

/// `true` if `category` is one of the suggestions for `kind`.
pub fn is_suggested(kind: TransactionKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_are_disjoint() {
        assert!(
            EXPENSE_CATEGORIES
                .iter()
                .all(|c| !INCOME_CATEGORIES.contains(c))
        );
    }

    #[test]
    fn suggestions_follow_kind() {
        assert!(is_suggested(TransactionKind::Expense, "Rent"));
        assert!(!is_suggested(TransactionKind::Income, "Rent"));
        assert!(is_suggested(TransactionKind::Income, "Salary"));
    }
}
