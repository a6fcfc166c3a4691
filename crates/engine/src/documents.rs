//! The module contains the schemaless document entity.
//!
//! Every resource lives in the same `documents` table, partitioned by
//! collection name. The body is kept as JSON exactly as the caller sent it,
//! minus the store-owned fields (`_id`, `createdAt`, `updatedAt`), which are
//! columns of their own and are merged back when a row is rendered.

use chrono::SecondsFormat;
use sea_orm::entity::prelude::*;
use serde_json::Value;

use crate::Document;

/// Store-assigned key, rendered as a string.
pub const STORE_ID: &str = "_id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
/// Client-assigned identifier used by every by-id operation.
pub const DOC_ID: &str = "id";

/// A named group of documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Budgets,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub key: i32,
    pub collection: String,
    /// Mirror of the body's `id` field, when it holds a string.
    pub doc_id: Option<String>,
    pub body: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Render the row as the document clients see.
    pub fn into_document(self) -> Document {
        let mut document = Document::new();
        document.insert(STORE_ID.to_string(), Value::String(self.key.to_string()));
        if let Value::Object(body) = self.body {
            document.extend(body);
        }
        document.insert(
            CREATED_AT.to_string(),
            Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        document.insert(
            UPDATED_AT.to_string(),
            Value::String(self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        document
    }
}

/// Drop the store-owned fields a client may have echoed back.
pub(crate) fn strip_reserved(document: &mut Document) {
    document.remove(STORE_ID);
    document.remove(CREATED_AT);
    document.remove(UPDATED_AT);
}

/// The `id` field, when it is a string.
pub(crate) fn doc_id_of(document: &Document) -> Option<String> {
    document
        .get(DOC_ID)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_store_fields_around_body() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        let model = Model {
            key: 7,
            collection: "transactions".to_string(),
            doc_id: Some("abc".to_string()),
            body: json!({"id": "abc", "amount": 12.5}),
            created_at: at,
            updated_at: at,
        };

        let document = model.into_document();
        assert_eq!(document["_id"], json!("7"));
        assert_eq!(document["id"], json!("abc"));
        assert_eq!(document["amount"], json!(12.5));
        assert_eq!(document["createdAt"], json!("2024-01-05T10:30:00.000Z"));
        assert_eq!(document["updatedAt"], json!("2024-01-05T10:30:00.000Z"));
    }

    #[test]
    fn strips_reserved_fields_only() {
        let Value::Object(mut document) =
            json!({"_id": "1", "id": "x", "createdAt": "now", "updatedAt": "now", "note": 1})
        else {
            unreachable!()
        };
        strip_reserved(&mut document);
        assert_eq!(Value::Object(document), json!({"id": "x", "note": 1}));
    }

    #[test]
    fn doc_id_requires_string() {
        let Value::Object(numeric) = json!({"id": 5}) else {
            unreachable!()
        };
        assert_eq!(doc_id_of(&numeric), None);
        assert_eq!(Collection::Budgets.name(), "budgets");
    }
}
