use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A schemaless document as stored and echoed by the server.
///
/// The server never interprets the body: whatever object the client sends is
/// persisted as-is, plus `_id`, `createdAt` and `updatedAt`.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Error body returned with every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Acknowledgement body returned by delete routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        #[default]
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

    /// A transaction as echoed back by the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        /// Decimal amount in currency units.
        pub amount: f64,
        /// Optional because the server does not reject documents without it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub category: String,
        /// Legacy documents without a type count as expenses.
        #[serde(rename = "type", default)]
        pub kind: TransactionKind,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub updated_at: Option<DateTime<Utc>>,
    }

    /// Request body for `POST /transactions`.
    ///
    /// `id` is generated client-side before the request is sent.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub id: String,
        pub amount: f64,
        pub description: String,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub date: NaiveDate,
    }

    /// Request body for `PUT /transactions/{id}`. Absent fields are left untouched.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse<T = Transaction> {
        pub transactions: Vec<T>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionResponse<T = Transaction> {
        pub transaction: T,
    }
}

pub mod budget {
    use super::*;

    /// Advisory period of a budget. Comparisons always use the current month.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
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

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        pub id: String,
        pub category: String,
        /// Spending limit in currency units.
        pub amount: f64,
        #[serde(default)]
        pub period: BudgetPeriod,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub updated_at: Option<DateTime<Utc>>,
    }

    /// Request body for `POST /budgets`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub id: String,
        pub category: String,
        pub amount: f64,
        pub period: BudgetPeriod,
    }

    /// Request body for `PUT /budgets/{id}`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub period: Option<BudgetPeriod>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse<T = Budget> {
        pub budgets: Vec<T>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetResponse<T = Budget> {
        pub budget: T,
    }
}

#[cfg(test)]
mod tests {
    use super::{budget::*, transaction::*};

    #[test]
    fn transaction_reads_server_document() {
        let raw = r#"{
            "_id": 7,
            "id": "abc",
            "amount": 12.5,
            "category": "Groceries",
            "type": "expense",
            "date": "2024-03-09",
            "createdAt": "2024-03-09T10:00:00Z",
            "updatedAt": "2024-03-09T10:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, "abc");
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.description, None);
        assert!(tx.created_at.is_some());
    }

    #[test]
    fn update_skips_absent_fields() {
        let update = TransactionUpdate {
            amount: Some(3.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "amount": 3.0 }));
    }

    #[test]
    fn typeless_transaction_is_an_expense() {
        let raw = r#"{ "id": "t1", "amount": 4.5, "category": "Food", "date": "2024-01-05" }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
    }

    #[test]
    fn budget_period_defaults_to_monthly() {
        let raw = r#"{ "id": "b1", "category": "Rent", "amount": 900 }"#;
        let budget: Budget = serde_json::from_str(raw).unwrap();
        assert_eq!(budget.period, BudgetPeriod::Monthly);
        assert_eq!(budget.amount, 900.0);
    }
}
