//! Aggregations over in-memory transactions and budgets.
//!
//! Every function here is pure and total: empty input yields zero or empty
//! output. Months are 1-based (`1` = January).
//!
//! "Spending" views (dashboard, budget comparison and usage) only count
//! `expense` transactions. The generic helpers (`month_slice`,
//! `category_totals`, `category_breakdown`, `monthly_series`) aggregate
//! whatever they are given.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    Budget, Money, Transaction, TransactionKind,
    format::{month_name, previous_month, short_month_name},
};

/// Transactions dated in the given calendar month, input order preserved.
pub fn month_slice(transactions: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.in_month(year, month))
        .cloned()
        .collect()
}

/// Only the `expense` transactions, input order preserved.
pub fn expenses(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .cloned()
        .collect()
}

pub fn total(transactions: &[Transaction]) -> Money {
    transactions.iter().map(|tx| tx.amount).sum()
}

/// Per-category sums, kept in the order each category first appears.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals(Vec<(String, Money)>);

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Money) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, sum)) => *sum += amount,
            None => self.0.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, sum)| *sum)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0.iter().map(|(name, sum)| (name.as_str(), *sum))
    }

    pub fn values(&self) -> impl Iterator<Item = Money> + '_ {
        self.0.iter().map(|(_, sum)| *sum)
    }

    /// Largest first. The sort is stable, so ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(String, Money)> {
        let mut ranked = self.0.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Sum of amounts per observed category.
pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions {
        totals.add(&tx.category, tx.amount);
    }
    totals
}

/// Transactions per category, keyed by name.
pub fn group_by_category(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut grouped: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        grouped.entry(tx.category.clone()).or_default().push(tx.clone());
    }
    grouped
}

/// Percentage of `budget` consumed by `spent`, clamped to `[.., 100]`.
///
/// A zero budget yields `0` rather than a division error.
pub fn budget_progress(spent: Money, budget: Money) -> f64 {
    if budget.is_zero() {
        return 0.0;
    }
    (spent.cents() as f64 / budget.cents() as f64 * 100.0).min(100.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

pub fn budget_status(spent: Money, budget: Money) -> BudgetStatus {
    let percentage = budget_progress(spent, budget);
    if percentage >= 100.0 {
        BudgetStatus::Over
    } else if percentage >= 80.0 {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Good
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub total: Money,
    pub count: usize,
    pub category_totals: CategoryTotals,
    pub transactions: Vec<Transaction>,
}

pub fn monthly_report(transactions: &[Transaction], year: i32, month: u32) -> MonthlyReport {
    let slice = month_slice(transactions, year, month);
    MonthlyReport {
        year,
        month,
        month_name: month_name(month),
        total: total(&slice),
        count: slice.len(),
        category_totals: category_totals(&slice),
        transactions: slice,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthPoint {
    pub label: &'static str,
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub count: usize,
}

/// One point per month for the `months` months ending at `today`, oldest first.
pub fn monthly_series(transactions: &[Transaction], today: NaiveDate, months: u32) -> Vec<MonthPoint> {
    let mut cursor = (today.year(), today.month());
    let mut points = Vec::with_capacity(months as usize);
    for _ in 0..months {
        let (year, month) = cursor;
        let slice = month_slice(transactions, year, month);
        points.push(MonthPoint {
            label: short_month_name(month),
            year,
            month,
            total: total(&slice),
            count: slice.len(),
        });
        cursor = previous_month(year, month);
    }
    points.reverse();
    points
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Share of the grand total; `0` when the grand total is zero.
    pub percentage: f64,
}

/// Category totals sorted largest first, with their share of the grand total.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = category_totals(transactions);
    let grand_total: Money = totals.values().sum();
    totals
        .ranked()
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            total: amount,
            percentage: amount.percent_of(grand_total).unwrap_or(0.0),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BudgetComparison {
    pub category: String,
    pub budget: Money,
    pub actual: Money,
    pub remaining: Money,
    pub over_budget: Money,
}

/// Budget against actual expense per budget, for one calendar month.
pub fn budget_comparison(
    transactions: &[Transaction],
    budgets: &[Budget],
    year: i32,
    month: u32,
) -> Vec<BudgetComparison> {
    let spending = category_totals(&expenses(&month_slice(transactions, year, month)));
    budgets
        .iter()
        .map(|budget| {
            let actual = spending.get(&budget.category).unwrap_or_default();
            BudgetComparison {
                category: budget.category.clone(),
                budget: budget.amount,
                actual,
                remaining: (budget.amount - actual).max(Money::ZERO),
                over_budget: (actual - budget.amount).max(Money::ZERO),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetUsage {
    pub spent: Money,
    pub remaining: Money,
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// How much of a single budget the month's expenses in its category consumed.
pub fn budget_usage(budget: &Budget, transactions: &[Transaction], year: i32, month: u32) -> BudgetUsage {
    let spent: Money = transactions
        .iter()
        .filter(|tx| {
            tx.kind == TransactionKind::Expense
                && tx.category == budget.category
                && tx.in_month(year, month)
        })
        .map(|tx| tx.amount.abs())
        .sum();
    BudgetUsage {
        spent,
        remaining: (budget.amount - spent).max(Money::ZERO),
        percentage: budget_progress(spent, budget.amount),
        status: budget_status(spent, budget.amount),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    pub month_total: Money,
    pub month_count: usize,
    /// Change against the previous month; `0` when the previous month is empty.
    pub month_change_percent: f64,
    pub all_time_total: Money,
    pub all_time_count: usize,
    pub largest: Option<Transaction>,
    pub top_category: Option<(String, Money)>,
    pub recent: Vec<Transaction>,
}

const RECENT_LIMIT: usize = 3;

pub fn dashboard_summary(transactions: &[Transaction], today: NaiveDate) -> DashboardSummary {
    let spending = expenses(transactions);
    let (year, month) = (today.year(), today.month());
    let (prev_year, prev_month) = previous_month(year, month);

    let current = month_slice(&spending, year, month);
    let month_total = total(&current);
    let prev_total = total(&month_slice(&spending, prev_year, prev_month));
    let month_change_percent = (month_total - prev_total)
        .percent_of(prev_total)
        .unwrap_or(0.0);

    let largest = current
        .iter()
        .fold(None::<&Transaction>, |max, tx| match max {
            Some(max) if tx.amount <= max.amount => Some(max),
            _ => Some(tx),
        })
        .cloned();

    let top_category = category_totals(&current)
        .ranked()
        .into_iter()
        .next()
        .filter(|(_, amount)| amount.is_positive());

    let mut recent = spending.clone();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_LIMIT);

    DashboardSummary {
        year,
        month,
        month_total,
        month_count: current.len(),
        month_change_percent,
        all_time_total: total(&spending),
        all_time_count: spending.len(),
        largest,
        top_category,
        recent,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Overview {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net: Money,
    pub average_transaction: Money,
    pub transaction_count: usize,
    /// At most five categories, largest first.
    pub top_categories: Vec<(String, Money)>,
    /// Expenses over income in percent; `None` without income.
    pub expense_ratio: Option<f64>,
}

const TOP_CATEGORIES: usize = 5;

/// All-time income/expense figures across every transaction.
pub fn overview(transactions: &[Transaction]) -> Overview {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((Money::ZERO, Money::ZERO), |(income, spent), tx| match tx.kind {
                TransactionKind::Income => (income + tx.amount, spent),
                TransactionKind::Expense => (income, spent + tx.amount),
            });

    let count = transactions.len();
    let average_transaction = if count == 0 {
        Money::ZERO
    } else {
        Money::new((total(transactions).cents() as f64 / count as f64).round() as i64)
    };

    let mut top_categories = category_totals(transactions).ranked();
    top_categories.truncate(TOP_CATEGORIES);

    Overview {
        total_income,
        total_expenses,
        net: total_income - total_expenses,
        average_transaction,
        transaction_count: count,
        top_categories,
        expense_ratio: total_expenses.percent_of(total_income),
    }
}
