//! Conversions from wire types to engine types.

use api_types::{
    budget::{Budget as ApiBudget, BudgetPeriod as ApiBudgetPeriod},
    transaction::{Transaction as ApiTransaction, TransactionKind as ApiTransactionKind},
};
use engine::{Budget, BudgetPeriod, Money, Transaction, TransactionKind};

pub fn transaction_kind(kind: ApiTransactionKind) -> TransactionKind {
    match kind {
        ApiTransactionKind::Expense => TransactionKind::Expense,
        ApiTransactionKind::Income => TransactionKind::Income,
    }
}

pub fn api_transaction_kind(kind: TransactionKind) -> ApiTransactionKind {
    match kind {
        TransactionKind::Expense => ApiTransactionKind::Expense,
        TransactionKind::Income => ApiTransactionKind::Income,
    }
}

pub fn budget_period(period: ApiBudgetPeriod) -> BudgetPeriod {
    match period {
        ApiBudgetPeriod::Monthly => BudgetPeriod::Monthly,
        ApiBudgetPeriod::Quarterly => BudgetPeriod::Quarterly,
        ApiBudgetPeriod::Yearly => BudgetPeriod::Yearly,
    }
}

pub fn api_budget_period(period: BudgetPeriod) -> ApiBudgetPeriod {
    match period {
        BudgetPeriod::Monthly => ApiBudgetPeriod::Monthly,
        BudgetPeriod::Quarterly => ApiBudgetPeriod::Quarterly,
        BudgetPeriod::Yearly => ApiBudgetPeriod::Yearly,
    }
}

pub fn transaction(tx: &ApiTransaction) -> Transaction {
    Transaction::new(
        tx.id.clone(),
        Money::from_decimal(tx.amount),
        tx.description.clone(),
        tx.category.clone(),
        transaction_kind(tx.kind),
        tx.date,
    )
}

pub fn budget(budget: &ApiBudget) -> Budget {
    Budget::new(
        budget.id.clone(),
        budget.category.clone(),
        Money::from_decimal(budget.amount),
        budget_period(budget.period),
    )
}

pub fn transactions(txs: &[ApiTransaction]) -> Vec<Transaction> {
    txs.iter().map(transaction).collect()
}

pub fn budgets(budgets: &[ApiBudget]) -> Vec<Budget> {
    budgets.iter().map(budget).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn amounts_round_to_cents() {
        let tx = ApiTransaction {
            id: "t1".to_string(),
            amount: 19.999,
            description: None,
            category: "Food & Dining".to_string(),
            kind: ApiTransactionKind::Expense,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            created_at: None,
            updated_at: None,
        };
        let mapped = transaction(&tx);
        assert_eq!(mapped.amount, Money::new(2_000));
        assert_eq!(mapped.kind, TransactionKind::Expense);
    }

    #[test]
    fn periods_map_both_ways() {
        for period in [
            BudgetPeriod::Monthly,
            BudgetPeriod::Quarterly,
            BudgetPeriod::Yearly,
        ] {
            assert_eq!(budget_period(api_budget_period(period)), period);
        }
    }
}
