//! Finance tracker engine.
//!
//! Money primitives, formatting and validation helpers, the aggregation
//! functions behind every dashboard view and the document store the REST
//! layer sits on.

use uuid::Uuid;

pub use budgets::{Budget, BudgetPeriod};
pub use documents::Collection;
pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use transactions::{Transaction, TransactionKind};

pub mod analytics;
mod budgets;
pub mod categories;
pub mod documents;
mod error;
pub mod format;
pub mod insights;
mod money;
mod ops;
mod transactions;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// A schemaless JSON document as stored and served.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A fresh client-side identifier for a new document.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
