//! Text rendering of every view.

use std::fmt::Write;

use engine::{
    Budget, Transaction, TransactionKind,
    analytics::{
        BudgetComparison, BudgetUsage, CategoryShare, DashboardSummary, MonthPoint, MonthlyReport,
        Overview,
    },
    format::{format_currency, format_date, format_percent, month_name},
    insights::{Insight, InsightKind},
};

const BAR_WIDTH: usize = 20;

fn bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn badge(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Danger => "!!",
        InsightKind::Warning => "! ",
        InsightKind::Positive => "+ ",
        InsightKind::Info => "i ",
    }
}

pub fn transaction_line(tx: &Transaction) -> String {
    let sign = if tx.is_expense() { "-" } else { "+" };
    format!(
        "{:<12} {:<13} {sign}{:>12}  {:<20} {}  [{}]",
        tx.id.get(..12).unwrap_or(&tx.id),
        format_date(tx.date),
        format_currency(tx.amount),
        tx.category,
        tx.description.as_deref().unwrap_or("-"),
        tx.kind.as_str()
    )
}

pub fn transactions(txs: &[Transaction]) -> String {
    if txs.is_empty() {
        return "No transactions found.\n".to_string();
    }
    let mut out = String::new();
    for tx in txs {
        let _ = writeln!(out, "{}", transaction_line(tx));
    }
    out
}

pub fn budgets(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }
    let mut out = String::new();
    for budget in budgets {
        let _ = writeln!(
            out,
            "{:<12} {:<20} {:>12}  {}",
            budget.id.get(..12).unwrap_or(&budget.id),
            budget.category,
            format_currency(budget.amount),
            budget.period.as_str()
        );
    }
    out
}

pub fn budget_status(rows: &[(Budget, BudgetUsage)]) -> String {
    if rows.is_empty() {
        return "No budgets set.\n".to_string();
    }
    let mut out = String::new();
    for (budget, usage) in rows {
        let _ = writeln!(
            out,
            "{:<20} {} {:>6}  {} of {}  ({} left, {})",
            budget.category,
            bar(usage.percentage),
            format_percent(usage.percentage),
            format_currency(usage.spent),
            format_currency(budget.amount),
            format_currency(usage.remaining),
            usage.status.as_str()
        );
    }
    out
}

pub fn dashboard(summary: &DashboardSummary, series: &[MonthPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} spending: {} across {} transactions ({} vs last month)",
        month_name(summary.month),
        summary.year,
        format_currency(summary.month_total),
        summary.month_count,
        format_percent(summary.month_change_percent)
    );
    let _ = writeln!(
        out,
        "All time: {} across {} transactions",
        format_currency(summary.all_time_total),
        summary.all_time_count
    );
    if let Some(largest) = &summary.largest {
        let _ = writeln!(
            out,
            "Largest this month: {} ({})",
            format_currency(largest.amount),
            largest.description.as_deref().unwrap_or(&largest.category)
        );
    }
    if let Some((category, amount)) = &summary.top_category {
        let _ = writeln!(out, "Top category: {category} ({})", format_currency(*amount));
    }

    let _ = writeln!(out, "\nRecent transactions:");
    out.push_str(&transactions(&summary.recent));

    let _ = writeln!(out, "\nMonthly expenses:");
    let peak = series.iter().map(|p| p.total.cents()).max().unwrap_or(0);
    for point in series {
        let share = if peak == 0 {
            0.0
        } else {
            point.total.cents() as f64 / peak as f64 * 100.0
        };
        let _ = writeln!(
            out,
            "{} {} {} {:>12}",
            point.label,
            point.year,
            bar(share),
            format_currency(point.total)
        );
    }
    out
}

pub fn analytics(
    overview: &Overview,
    report: &MonthlyReport,
    breakdown: &[CategoryShare],
    comparison: &[BudgetComparison],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total income:    {:>12}", format_currency(overview.total_income));
    let _ = writeln!(out, "Total expenses:  {:>12}", format_currency(overview.total_expenses));
    let _ = writeln!(out, "Net:             {:>12}", format_currency(overview.net));
    let _ = writeln!(
        out,
        "Average amount:  {:>12} over {} transactions",
        format_currency(overview.average_transaction),
        overview.transaction_count
    );
    match overview.expense_ratio {
        Some(ratio) => {
            let _ = writeln!(out, "Expense ratio:   {:>12}", format_percent(ratio));
        }
        None => {
            let _ = writeln!(out, "Expense ratio:   {:>12}", "n/a");
        }
    }

    if !overview.top_categories.is_empty() {
        let _ = writeln!(out, "\nTop categories:");
        for (category, amount) in &overview.top_categories {
            let _ = writeln!(out, "  {category:<20} {:>12}", format_currency(*amount));
        }
    }

    let _ = writeln!(
        out,
        "\n{} {}: {} expenses across {} transactions",
        report.month_name,
        report.year,
        format_currency(report.total),
        report.count
    );
    for share in breakdown {
        let _ = writeln!(
            out,
            "  {:<20} {} {:>12} {:>6}",
            share.category,
            bar(share.percentage),
            format_currency(share.total),
            format_percent(share.percentage)
        );
    }

    if !comparison.is_empty() {
        let _ = writeln!(out, "\nBudget vs actual:");
        for row in comparison {
            let _ = writeln!(
                out,
                "  {:<20} budget {:>12}  actual {:>12}  remaining {:>12}  over {:>12}",
                row.category,
                format_currency(row.budget),
                format_currency(row.actual),
                format_currency(row.remaining),
                format_currency(row.over_budget)
            );
        }
    }
    out
}

pub fn categories(groups: &[(TransactionKind, &[&str])]) -> String {
    let mut out = String::new();
    for (kind, names) in groups {
        let _ = writeln!(out, "{}:", kind.as_str());
        for name in names.iter() {
            let _ = writeln!(out, "  {name}");
        }
    }
    out
}

/// Notice for a category outside the suggestions of its type.
pub fn unsuggested_category(kind: TransactionKind, category: &str) -> String {
    format!(
        "note: \"{category}\" is not a suggested {} category (see `finance categories`)\n",
        kind.as_str()
    )
}

pub fn insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "No insights yet. Add more transactions to see patterns.\n".to_string();
    }
    let mut out = String::new();
    for insight in insights {
        let _ = writeln!(
            out,
            "{} {} ({})\n   {}\n   {}",
            badge(insight.kind),
            insight.title,
            insight.value,
            insight.description,
            insight.details
        );
    }
    out
}
