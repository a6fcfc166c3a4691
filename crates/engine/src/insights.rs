//! Heuristic spending insights.
//!
//! The battery is a fixed, ordered list of independent rules. Each rule looks
//! at the same [`SpendingSnapshot`] and yields zero or more [`Insight`]s; the
//! results are concatenated in rule order and capped to [`MAX_INSIGHTS`].
//! Only `expense` transactions count as spending, and every budget is compared
//! against the calendar month of `today` whatever its period.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    Budget, Money, Transaction,
    analytics::{CategoryTotals, category_totals, expenses, month_slice, total},
    format::{format_currency, format_date, month_name, previous_month},
};

pub const MAX_INSIGHTS: usize = 6;

const TREND_THRESHOLD: f64 = 5.0;
const BUDGET_WARNING: f64 = 80.0;
const BUDGET_EXCEEDED: f64 = 100.0;
const SPIKE_GROWTH: f64 = 50.0;
const SPIKE_FLOOR: Money = Money::new(10_000);
const CONCENTRATION: f64 = 40.0;
const HIGH_DAY_FACTOR: f64 = 2.0;
const HIGH_DAY_FLOOR: Money = Money::new(20_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Danger,
    Warning,
    Positive,
    Info,
}

impl InsightKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Positive => "positive",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: String,
    /// Formatted currency.
    pub value: String,
    pub details: String,
}

/// Current and previous month spending derived once from a caller-supplied `today`.
#[derive(Clone, Debug)]
pub struct SpendingSnapshot {
    pub today: NaiveDate,
    pub month: u32,
    pub previous_month: u32,
    pub current: Vec<Transaction>,
    pub current_total: Money,
    pub previous_total: Money,
    pub current_by_category: CategoryTotals,
    pub previous_by_category: CategoryTotals,
    pub budgets: Vec<Budget>,
}

impl SpendingSnapshot {
    pub fn new(transactions: &[Transaction], budgets: &[Budget], today: NaiveDate) -> Self {
        let spending = expenses(transactions);
        let (year, month) = (today.year(), today.month());
        let (prev_year, prev_month) = previous_month(year, month);
        let current = month_slice(&spending, year, month);
        let previous = month_slice(&spending, prev_year, prev_month);

        Self {
            today,
            month,
            previous_month: prev_month,
            current_total: total(&current),
            previous_total: total(&previous),
            current_by_category: category_totals(&current),
            previous_by_category: category_totals(&previous),
            current,
            budgets: budgets.to_vec(),
        }
    }

    fn spent_in(&self, category: &str) -> Money {
        self.current_by_category.get(category).unwrap_or_default()
    }
}

/// A named rule of the battery.
pub struct InsightRule {
    pub name: &'static str,
    pub evaluate: fn(&SpendingSnapshot) -> Vec<Insight>,
}

pub const RULES: [InsightRule; 6] = [
    InsightRule {
        name: "monthly_trend",
        evaluate: monthly_trend,
    },
    InsightRule {
        name: "budget_alerts",
        evaluate: budget_alerts,
    },
    InsightRule {
        name: "category_spikes",
        evaluate: category_spikes,
    },
    InsightRule {
        name: "top_category",
        evaluate: top_category,
    },
    InsightRule {
        name: "high_spending_day",
        evaluate: high_spending_day,
    },
    InsightRule {
        name: "under_budget",
        evaluate: under_budget,
    },
];

/// Run the whole battery and keep the first [`MAX_INSIGHTS`] results.
pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> Vec<Insight> {
    let snapshot = SpendingSnapshot::new(transactions, budgets, today);
    RULES
        .iter()
        .flat_map(|rule| {
            let found = (rule.evaluate)(&snapshot);
            if !found.is_empty() {
                tracing::trace!(rule = rule.name, count = found.len(), "insight rule matched");
            }
            found
        })
        .take(MAX_INSIGHTS)
        .collect()
}

pub fn monthly_trend(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    let Some(change) = (snapshot.current_total - snapshot.previous_total)
        .percent_of(snapshot.previous_total)
    else {
        return Vec::new();
    };
    if !snapshot.previous_total.is_positive() || change.abs() <= TREND_THRESHOLD {
        return Vec::new();
    }

    let increased = change > 0.0;
    vec![Insight {
        kind: if increased {
            InsightKind::Warning
        } else {
            InsightKind::Positive
        },
        title: "Monthly Spending Trend",
        description: format!(
            "Your spending {} by {:.1}% compared to last month",
            if increased { "increased" } else { "decreased" },
            change.abs()
        ),
        value: format_currency((snapshot.current_total - snapshot.previous_total).abs()),
        details: format!(
            "{}: {} → {}: {}",
            month_name(snapshot.previous_month),
            format_currency(snapshot.previous_total),
            month_name(snapshot.month),
            format_currency(snapshot.current_total)
        ),
    }]
}

pub fn budget_alerts(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    snapshot
        .budgets
        .iter()
        .filter_map(|budget| {
            let spent = snapshot.spent_in(&budget.category);
            let percentage = spent.percent_of(budget.amount)?;
            if percentage > BUDGET_EXCEEDED {
                Some(Insight {
                    kind: InsightKind::Danger,
                    title: "Budget Exceeded",
                    description: format!(
                        "You've exceeded your {} budget by {:.1}%",
                        budget.category,
                        percentage - 100.0
                    ),
                    value: format_currency(spent - budget.amount),
                    details: format!(
                        "Budget: {} | Spent: {}",
                        format_currency(budget.amount),
                        format_currency(spent)
                    ),
                })
            } else if percentage > BUDGET_WARNING {
                Some(Insight {
                    kind: InsightKind::Warning,
                    title: "Budget Warning",
                    description: format!(
                        "You've used {percentage:.1}% of your {} budget",
                        budget.category
                    ),
                    value: format_currency(budget.amount - spent),
                    details: format!(
                        "{} spent of {} budget",
                        format_currency(spent),
                        format_currency(budget.amount)
                    ),
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn category_spikes(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    snapshot
        .current_by_category
        .iter()
        .filter_map(|(category, current)| {
            let previous = snapshot.previous_by_category.get(category)?;
            if !previous.is_positive() {
                return None;
            }
            let growth = (current - previous).percent_of(previous)?;
            if growth <= SPIKE_GROWTH || current <= SPIKE_FLOOR {
                return None;
            }
            Some(Insight {
                kind: InsightKind::Info,
                title: "Category Spending Spike",
                description: format!("Your {category} spending increased by {growth:.1}% this month"),
                value: format_currency(current - previous),
                details: format!(
                    "Previous: {} | Current: {}",
                    format_currency(previous),
                    format_currency(current)
                ),
            })
        })
        .collect()
}

pub fn top_category(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    let Some((category, amount)) = snapshot.current_by_category.ranked().into_iter().next() else {
        return Vec::new();
    };
    match amount.percent_of(snapshot.current_total) {
        Some(share) if share > CONCENTRATION => vec![Insight {
            kind: InsightKind::Info,
            title: "Top Spending Category",
            description: format!("{category} represents {share:.1}% of your total spending"),
            value: format_currency(amount),
            details: "Consider if this allocation aligns with your financial goals".to_string(),
        }],
        _ => Vec::new(),
    }
}

pub fn high_spending_day(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for tx in &snapshot.current {
        *by_day.entry(tx.date).or_default() += tx.amount;
    }

    let average = snapshot.current_total.cents() as f64 / f64::from(snapshot.today.day());
    if average <= 0.0 {
        return Vec::new();
    }

    let highest = by_day
        .into_iter()
        .filter(|(_, amount)| {
            amount.cents() as f64 > average * HIGH_DAY_FACTOR && *amount > HIGH_DAY_FLOOR
        })
        .fold(None::<(NaiveDate, Money)>, |best, day| match best {
            Some(best) if day.1 <= best.1 => Some(best),
            _ => Some(day),
        });

    highest
        .map(|(date, amount)| Insight {
            kind: InsightKind::Info,
            title: "High Spending Day",
            description: format!("You had a high spending day on {}", format_date(date)),
            value: format_currency(amount),
            details: format!(
                "This was {:.1}x your average daily spending",
                amount.cents() as f64 / average
            ),
        })
        .into_iter()
        .collect()
}

pub fn under_budget(snapshot: &SpendingSnapshot) -> Vec<Insight> {
    if snapshot.budgets.is_empty() {
        return Vec::new();
    }
    let budgeted: Money = snapshot.budgets.iter().map(|budget| budget.amount).sum();
    if snapshot.current_total >= budgeted {
        return Vec::new();
    }
    let savings = budgeted - snapshot.current_total;
    vec![Insight {
        kind: InsightKind::Positive,
        title: "Under Budget",
        description: format!(
            "You're {} under your total monthly budget",
            format_currency(savings)
        ),
        value: format_currency(savings),
        details: "Great job staying within your spending limits!".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BudgetPeriod, TransactionKind, analytics::budget_progress, analytics::budget_status};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spend(cents: i64, category: &str, on: NaiveDate) -> Transaction {
        Transaction::new(
            format!("{category}-{on}-{cents}"),
            Money::new(cents),
            None,
            category,
            TransactionKind::Expense,
            on,
        )
    }

    fn budget(category: &str, cents: i64) -> Budget {
        Budget::new(category, category, Money::new(cents), BudgetPeriod::Monthly)
    }

    #[test]
    fn food_over_budget_in_january() {
        let txs = vec![
            spend(5_000, "Food", date(2024, 1, 5)),
            spend(15_000, "Food", date(2024, 1, 20)),
        ];
        let budgets = vec![budget("Food", 10_000)];

        let totals = category_totals(&month_slice(&txs, 2024, 1));
        assert_eq!(totals.len(), 1);
        let food = totals.get("Food").unwrap();
        assert_eq!(food, Money::new(20_000));
        assert_eq!(budget_progress(food, budgets[0].amount), 100.0);
        assert_eq!(
            budget_status(food, budgets[0].amount),
            crate::analytics::BudgetStatus::Over
        );

        let insights = generate_insights(&txs, &budgets, date(2024, 1, 25));
        let exceeded = insights
            .iter()
            .find(|insight| insight.title == "Budget Exceeded")
            .unwrap();
        assert_eq!(exceeded.kind, InsightKind::Danger);
        assert_eq!(exceeded.value, format_currency(Money::new(10_000)));
        assert_eq!(exceeded.description, "You've exceeded your Food budget by 100.0%");
        assert_eq!(exceeded.details, "Budget: $100.00 | Spent: $200.00");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(generate_insights(&[], &[], date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn trend_warns_on_increase_and_praises_decrease() {
        let up = SpendingSnapshot::new(
            &[
                spend(10_000, "Rent", date(2024, 1, 3)),
                spend(12_000, "Rent", date(2024, 2, 3)),
            ],
            &[],
            date(2024, 2, 10),
        );
        let insight = &monthly_trend(&up)[0];
        assert_eq!(insight.kind, InsightKind::Warning);
        assert_eq!(insight.value, "$20.00");
        assert_eq!(insight.details, "January: $100.00 → February: $120.00");
        assert_eq!(
            insight.description,
            "Your spending increased by 20.0% compared to last month"
        );

        let down = SpendingSnapshot::new(
            &[spend(10_000, "Rent", date(2023, 12, 3))],
            &[],
            date(2024, 1, 10),
        );
        assert_eq!(monthly_trend(&down)[0].kind, InsightKind::Positive);
    }

    #[test]
    fn trend_ignores_small_changes_and_empty_previous_month() {
        let flat = SpendingSnapshot::new(
            &[
                spend(10_000, "Rent", date(2024, 1, 3)),
                spend(10_500, "Rent", date(2024, 2, 3)),
            ],
            &[],
            date(2024, 2, 10),
        );
        assert!(monthly_trend(&flat).is_empty());

        let fresh = SpendingSnapshot::new(
            &[spend(10_000, "Rent", date(2024, 2, 3))],
            &[],
            date(2024, 2, 10),
        );
        assert!(monthly_trend(&fresh).is_empty());
    }

    #[test]
    fn budget_alerts_follow_budget_order() {
        let snapshot = SpendingSnapshot::new(
            &[
                spend(9_000, "Food", date(2024, 1, 5)),
                spend(12_000, "Travel", date(2024, 1, 6)),
                spend(1_000, "Rent", date(2024, 1, 6)),
            ],
            &[
                budget("Food", 10_000),
                budget("Travel", 10_000),
                budget("Rent", 10_000),
                budget("Gifts", 0),
            ],
            date(2024, 1, 10),
        );
        let alerts = budget_alerts(&snapshot);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "Budget Warning");
        assert_eq!(alerts[0].value, "$10.00");
        assert_eq!(alerts[0].description, "You've used 90.0% of your Food budget");
        assert_eq!(alerts[1].title, "Budget Exceeded");
        assert_eq!(alerts[1].value, "$20.00");
    }

    #[test]
    fn budget_alert_thresholds_are_strict() {
        let snapshot = SpendingSnapshot::new(
            &[spend(8_000, "Food", date(2024, 1, 5))],
            &[budget("Food", 10_000)],
            date(2024, 1, 10),
        );
        assert!(budget_alerts(&snapshot).is_empty());
    }

    #[test]
    fn spike_needs_growth_and_floor() {
        let snapshot = SpendingSnapshot::new(
            &[
                spend(6_000, "Food", date(2024, 1, 5)),
                spend(12_000, "Food", date(2024, 2, 5)),
                spend(1_000, "Fun", date(2024, 1, 5)),
                spend(9_000, "Fun", date(2024, 2, 5)),
            ],
            &[],
            date(2024, 2, 20),
        );
        let spikes = category_spikes(&snapshot);
        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].value, "$60.00");
        assert_eq!(spikes[0].details, "Previous: $60.00 | Current: $120.00");
    }

    #[test]
    fn top_category_needs_concentration() {
        let snapshot = SpendingSnapshot::new(
            &[
                spend(3_000, "Food", date(2024, 1, 5)),
                spend(3_000, "Fun", date(2024, 1, 5)),
                spend(4_000, "Rent", date(2024, 1, 5)),
            ],
            &[],
            date(2024, 1, 10),
        );
        assert!(top_category(&snapshot).is_empty());

        let snapshot = SpendingSnapshot::new(
            &[
                spend(3_000, "Food", date(2024, 1, 5)),
                spend(7_000, "Rent", date(2024, 1, 5)),
            ],
            &[],
            date(2024, 1, 10),
        );
        let insight = &top_category(&snapshot)[0];
        assert_eq!(insight.description, "Rent represents 70.0% of your total spending");
    }

    #[test]
    fn high_spending_day_picks_the_highest() {
        let snapshot = SpendingSnapshot::new(
            &[
                spend(30_000, "Rent", date(2024, 1, 2)),
                spend(50_000, "Travel", date(2024, 1, 8)),
                spend(1_000, "Food", date(2024, 1, 9)),
            ],
            &[],
            date(2024, 1, 10),
        );
        let insights = high_spending_day(&snapshot);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].value, "$500.00");
        assert_eq!(insights[0].description, "You had a high spending day on Jan 8, 2024");
        assert_eq!(insights[0].details, "This was 6.2x your average daily spending");
    }

    #[test]
    fn under_budget_sums_every_budget() {
        let snapshot = SpendingSnapshot::new(
            &[spend(5_000, "Food", date(2024, 1, 5))],
            &[budget("Food", 10_000), budget("Rent", 20_000)],
            date(2024, 1, 10),
        );
        let insight = &under_budget(&snapshot)[0];
        assert_eq!(insight.kind, InsightKind::Positive);
        assert_eq!(insight.value, "$250.00");
        assert_eq!(insight.description, "You're $250.00 under your total monthly budget");
    }

    #[test]
    fn output_is_capped_in_rule_order() {
        let mut txs = Vec::new();
        let mut budgets = Vec::new();
        for category in ["A", "B", "C", "D", "E", "F", "G"] {
            txs.push(spend(20_000, category, date(2024, 1, 5)));
            budgets.push(budget(category, 10_000));
        }
        let insights = generate_insights(&txs, &budgets, date(2024, 1, 10));
        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert!(insights.iter().all(|insight| insight.title == "Budget Exceeded"));
        assert!(insights[0].description.contains("your A budget"));
    }

    #[test]
    fn spikes_follow_first_seen_category_order() {
        let mut txs = Vec::new();
        for category in ["Zoo", "Yoga", "Xmas", "Wine", "Vet", "Books", "Art"] {
            txs.push(spend(10_000, category, date(2024, 1, 5)));
        }
        for category in ["Zoo", "Yoga", "Xmas", "Wine", "Vet", "Books", "Art"] {
            txs.push(spend(20_000, category, date(2024, 2, 5)));
        }
        let insights = generate_insights(&txs, &[], date(2024, 2, 28));

        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert_eq!(insights[0].title, "Monthly Spending Trend");
        let spiked: Vec<_> = insights[1..]
            .iter()
            .map(|insight| insight.description.split(' ').nth(1).unwrap_or_default())
            .collect();
        assert_eq!(spiked, vec!["Zoo", "Yoga", "Xmas", "Wine", "Vet"]);
    }

    #[test]
    fn top_category_tie_keeps_first_seen() {
        let snapshot = SpendingSnapshot::new(
            &[
                spend(5_000, "Rent", date(2024, 1, 5)),
                spend(5_000, "Food", date(2024, 1, 6)),
            ],
            &[],
            date(2024, 1, 10),
        );
        let insight = &top_category(&snapshot)[0];
        assert_eq!(insight.description, "Rent represents 50.0% of your total spending");
    }

    #[test]
    fn huge_amounts_do_not_overflow() {
        let huge = Money::from_decimal(5.0e16);
        let txs: Vec<_> = [5, 6]
            .into_iter()
            .map(|day| {
                Transaction::new(
                    format!("big-{day}"),
                    huge,
                    None,
                    "Food",
                    TransactionKind::Expense,
                    date(2024, 1, day),
                )
            })
            .collect();
        let snapshot = SpendingSnapshot::new(&txs, &[], date(2024, 1, 10));
        assert_eq!(snapshot.current_total, Money::new(i64::MAX));

        let insights = generate_insights(&txs, &[budget("Food", 10_000)], date(2024, 1, 10));
        assert_eq!(insights[0].title, "Budget Exceeded");
        assert!(insights.iter().any(|insight| insight.title == "Top Spending Category"));
    }

    #[test]
    fn income_is_not_spending() {
        let txs = vec![Transaction::new(
            "salary",
            Money::new(500_000),
            None,
            "Salary",
            TransactionKind::Income,
            date(2024, 1, 5),
        )];
        assert!(generate_insights(&txs, &[], date(2024, 1, 10)).is_empty());
    }
}
