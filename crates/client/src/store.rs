//! Client state store.
//!
//! `Store` owns the canonical in-memory copy of both collections. Every
//! mutating action issues exactly one request; the collections change only
//! when the request succeeds, and every change is written to the local
//! snapshot.

use std::path::{Path, PathBuf};

use api_types::{
    Document,
    budget::{Budget, BudgetNew, BudgetUpdate},
    transaction::{Transaction, TransactionNew, TransactionUpdate},
};
use serde::de::DeserializeOwned;

use crate::{
    client::{Client, ClientError},
    error::Result,
    snapshot::Snapshot,
};

/// Outcome of a store action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success(T),
    NotFound,
    Failure(String),
}

impl<T> ActionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug)]
pub struct Store {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    error: Option<String>,
    client: Client,
    snapshot_path: PathBuf,
}

impl Store {
    /// Build a store seeded from the snapshot at `snapshot_path`.
    ///
    /// A missing snapshot yields empty collections.
    pub fn open(client: Client, snapshot_path: impl Into<PathBuf>) -> Result<Self> {
        let snapshot_path = snapshot_path.into();
        let snapshot = Snapshot::load(&snapshot_path)?;
        tracing::debug!(
            path = %snapshot_path.display(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "loaded snapshot"
        );
        Ok(Self {
            transactions: snapshot.transactions,
            budgets: snapshot.budgets,
            error: None,
            client,
            snapshot_path,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Message of the last failed action, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// `true` while no transaction is known locally.
    pub fn needs_initialization(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Load both collections concurrently.
    pub async fn initialize_data(&mut self) -> ActionResult<()> {
        let (transactions, budgets) =
            tokio::join!(self.client.transactions(), self.client.budgets());

        let mut failure = None;
        match transactions {
            Ok(documents) => self.transactions = read_documents(documents, "transaction"),
            Err(err) => failure = Some(err),
        }
        match budgets {
            Ok(documents) => self.budgets = read_documents(documents, "budget"),
            Err(err) => failure = failure.or(Some(err)),
        }
        self.persist();

        match failure {
            Some(err) => self.fail(err),
            None => self.succeed(()),
        }
    }

    pub async fn fetch_transactions(&mut self) -> ActionResult<usize> {
        match self.client.transactions().await {
            Ok(documents) => {
                self.transactions = read_documents(documents, "transaction");
                self.persist();
                self.succeed(self.transactions.len())
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn fetch_budgets(&mut self) -> ActionResult<usize> {
        match self.client.budgets().await {
            Ok(documents) => {
                self.budgets = read_documents(documents, "budget");
                self.persist();
                self.succeed(self.budgets.len())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Create a transaction. `payload.id` is replaced with a fresh id.
    pub async fn add_transaction(&mut self, mut payload: TransactionNew) -> ActionResult<Transaction> {
        payload.id = engine::generate_id();
        match self.client.transaction_create(&payload).await {
            Ok(transaction) => {
                self.transactions.push(transaction.clone());
                self.persist();
                self.succeed(transaction)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn update_transaction(
        &mut self,
        id: &str,
        updates: &TransactionUpdate,
    ) -> ActionResult<Transaction> {
        match self.client.transaction_update(id, updates).await {
            Ok(transaction) => {
                replace_by_id(&mut self.transactions, id, transaction.clone(), |tx| &tx.id);
                self.persist();
                self.succeed(transaction)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn delete_transaction(&mut self, id: &str) -> ActionResult<()> {
        match self.client.transaction_delete(id).await {
            Ok(_) => {
                self.transactions.retain(|tx| tx.id != id);
                self.persist();
                self.succeed(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Create a budget. `payload.id` is replaced with a fresh id.
    pub async fn add_budget(&mut self, mut payload: BudgetNew) -> ActionResult<Budget> {
        payload.id = engine::generate_id();
        match self.client.budget_create(&payload).await {
            Ok(budget) => {
                self.budgets.push(budget.clone());
                self.persist();
                self.succeed(budget)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn update_budget(&mut self, id: &str, updates: &BudgetUpdate) -> ActionResult<Budget> {
        match self.client.budget_update(id, updates).await {
            Ok(budget) => {
                replace_by_id(&mut self.budgets, id, budget.clone(), |b| &b.id);
                self.persist();
                self.succeed(budget)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn delete_budget(&mut self, id: &str) -> ActionResult<()> {
        match self.client.budget_delete(id).await {
            Ok(_) => {
                self.budgets.retain(|budget| budget.id != id);
                self.persist();
                self.succeed(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Forget both collections and the last error, locally only.
    pub fn clear_data(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
        self.error = None;
        self.persist();
    }

    fn succeed<T>(&mut self, value: T) -> ActionResult<T> {
        self.error = None;
        ActionResult::Success(value)
    }

    fn fail<T>(&mut self, err: ClientError) -> ActionResult<T> {
        tracing::warn!("store action failed: {err}");
        match err {
            ClientError::NotFound => {
                self.error = Some("not found".to_string());
                ActionResult::NotFound
            }
            other => {
                let message = other.to_string();
                self.error = Some(message.clone());
                ActionResult::Failure(message)
            }
        }
    }

    fn persist(&self) {
        let snapshot = Snapshot {
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
        };
        if let Err(err) = snapshot.save(&self.snapshot_path) {
            tracing::warn!(
                path = %self.snapshot_path.display(),
                "failed to write snapshot: {err}"
            );
        }
    }
}

/// Typed entities from raw documents; unreadable documents are skipped.
fn read_documents<T: DeserializeOwned>(documents: Vec<Document>, kind: &str) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| {
            let store_id = document.get("_id").cloned();
            match serde_json::from_value(serde_json::Value::Object(document)) {
                Ok(entity) => Some(entity),
                Err(err) => {
                    tracing::warn!(?store_id, "skipping unreadable {kind}: {err}");
                    None
                }
            }
        })
        .collect()
}

fn replace_by_id<T>(items: &mut [T], id: &str, value: T, key: impl Fn(&T) -> &String) {
    if let Some(slot) = items.iter_mut().find(|item| key(item) == id) {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unreadable_documents_are_skipped() {
        let documents = vec![
            json!({"_id": "1", "id": "b1", "category": "Rent", "amount": 900, "period": "monthly"}),
            json!({"_id": "2", "id": "b2"}),
            json!({"_id": "3", "id": "b3", "category": "Food", "amount": 50}),
        ]
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

        let budgets: Vec<Budget> = read_documents(documents, "budget");
        let ids: Vec<_> = budgets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3"]);
    }

    #[test]
    fn replace_by_id_swaps_the_match() {
        let mut items = vec!["a".to_string(), "b".to_string()];
        replace_by_id(&mut items, "b", "c".to_string(), |s| s);
        assert_eq!(items, vec!["a".to_string(), "c".to_string()]);
    }
}
