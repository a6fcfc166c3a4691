use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use serde_json::Value;

use crate::{
    Collection, Document, EngineError, ResultEngine,
    documents::{self, doc_id_of, strip_reserved},
};

use super::{Engine, with_tx};

impl Engine {
    /// Every document of `collection`, in insertion order.
    pub async fn find_all(&self, collection: Collection) -> ResultEngine<Vec<Document>> {
        let models = documents::Entity::find()
            .filter(documents::Column::Collection.eq(collection.name()))
            .order_by_asc(documents::Column::Key)
            .all(&self.database)
            .await?;
        tracing::debug!(
            collection = collection.name(),
            count = models.len(),
            "loaded documents"
        );
        Ok(models.into_iter().map(documents::Model::into_document).collect())
    }

    /// Store `body` as a new document and return it with its store fields.
    ///
    /// The body is kept as-is: nothing is validated and missing fields stay
    /// missing.
    pub async fn insert(&self, collection: Collection, mut body: Document) -> ResultEngine<Document> {
        strip_reserved(&mut body);
        let now = Utc::now();
        let model = documents::ActiveModel {
            key: ActiveValue::NotSet,
            collection: ActiveValue::Set(collection.name().to_string()),
            doc_id: ActiveValue::Set(doc_id_of(&body)),
            body: ActiveValue::Set(Value::Object(body)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;
        tracing::debug!(
            collection = collection.name(),
            key = model.key,
            "inserted document"
        );
        Ok(model.into_document())
    }

    /// Merge the top-level keys of `updates` into the first document whose
    /// `id` equals `id`, refreshing `updatedAt`.
    pub async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        mut updates: Document,
    ) -> ResultEngine<Document> {
        strip_reserved(&mut updates);
        with_tx!(self, |db_tx| {
            let model = first_match(&db_tx, collection, id).await?;

            let mut body = match model.body.clone() {
                Value::Object(body) => body,
                other => {
                    return Err(EngineError::InvalidDocument(format!(
                        "document {} has a non-object body: {other}",
                        model.key
                    )));
                }
            };
            body.extend(updates);

            let mut active: documents::ActiveModel = model.into();
            active.doc_id = ActiveValue::Set(doc_id_of(&body));
            active.body = ActiveValue::Set(Value::Object(body));
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            tracing::debug!(
                collection = collection.name(),
                key = updated.key,
                "updated document"
            );
            Ok(updated.into_document())
        })
    }

    /// Remove the first document whose `id` equals `id` and return it.
    pub async fn delete_by_id(&self, collection: Collection, id: &str) -> ResultEngine<Document> {
        with_tx!(self, |db_tx| {
            let model = first_match(&db_tx, collection, id).await?;

            documents::Entity::delete_by_id(model.key)
                .exec(&db_tx)
                .await?;
            tracing::debug!(
                collection = collection.name(),
                key = model.key,
                "deleted document"
            );
            Ok(model.into_document())
        })
    }
}

/// The first document of `collection` whose `id` equals `id`, by insertion order.
async fn first_match<C: ConnectionTrait>(
    conn: &C,
    collection: Collection,
    id: &str,
) -> ResultEngine<documents::Model> {
    documents::Entity::find()
        .filter(documents::Column::Collection.eq(collection.name()))
        .filter(documents::Column::DocId.eq(id))
        .order_by_asc(documents::Column::Key)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
}
