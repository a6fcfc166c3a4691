//! Command line definition of the `finance` binary.

use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{BudgetPeriod, Money, TransactionKind};

#[derive(Debug, Parser)]
#[command(name = "finance", about = "Track income, expenses and budgets")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override API root (e.g. http://127.0.0.1:3000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override snapshot file path.
    #[arg(long, global = true)]
    pub state_path: Option<String>,
    /// Reference day for monthly views, `YYYY-MM-DD`. Defaults to today.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reload both collections from the server.
    Sync,
    #[command(subcommand)]
    Transactions(TransactionsCommand),
    #[command(subcommand)]
    Budgets(BudgetsCommand),
    /// Current month summary, recent activity and the last six months.
    Dashboard,
    /// Income/expense overview, category breakdown and budget comparison.
    Analytics,
    /// Heuristic observations about this month's spending.
    Insights,
    /// Suggested categories, per transaction type.
    Categories {
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
    },
    /// Forget the local copy of every collection.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum TransactionsCommand {
    List(TransactionListArgs),
    Add(TransactionFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: TransactionFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct TransactionListArgs {
    /// Only this month, `YYYY-MM`.
    #[arg(long, value_parser = parse_month)]
    pub month: Option<(i32, u32)>,
    #[arg(long = "type", value_enum)]
    pub kind: Option<KindArg>,
    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct TransactionFields {
    /// Amount in currency units, e.g. `12.50` or `$1,200`.
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub amount: Option<f64>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "type", value_enum)]
    pub kind: Option<KindArg>,
    /// `YYYY-MM-DD`; new transactions default to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum BudgetsCommand {
    List,
    Add(BudgetFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: BudgetFields,
    },
    Delete {
        id: String,
    },
    /// Spending against every budget for the current month.
    Status,
}

#[derive(Debug, Default, Args)]
pub struct BudgetFields {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub amount: Option<f64>,
    #[arg(long, value_enum)]
    pub period: Option<PeriodArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Expense,
    Income,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Expense => TransactionKind::Expense,
            KindArg::Income => TransactionKind::Income,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Monthly,
    Quarterly,
    Yearly,
}

impl From<PeriodArg> for BudgetPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Monthly => BudgetPeriod::Monthly,
            PeriodArg::Quarterly => BudgetPeriod::Quarterly,
            PeriodArg::Yearly => BudgetPeriod::Yearly,
        }
    }
}

fn parse_amount(value: &str) -> Result<f64, String> {
    Money::from_str(value)
        .map(Money::to_decimal)
        .map_err(|err| err.to_string())
}

fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {value}"))?;
    let year = year
        .parse::<i32>()
        .map_err(|err| format!("invalid year: {err}"))?;
    let month = month
        .parse::<u32>()
        .map_err(|err| format!("invalid month: {err}"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month out of range: {month}"));
    }
    Ok((year, month))
}
