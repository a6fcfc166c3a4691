//! Pass-through CRUD shared by every collection.

use api_types::MessageResponse;
use engine::{Collection, Document};

use crate::{ServerError, server::ServerState};

/// Route messages and target collection of one REST resource.
pub(crate) struct Resource {
    pub collection: Collection,
    pub not_found: &'static str,
    pub fetch_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
}

impl Resource {
    pub async fn list(&self, state: &ServerState) -> Result<Vec<Document>, ServerError> {
        state
            .engine
            .find_all(self.collection)
            .await
            .map_err(|err| ServerError::from_engine(err, self.not_found, self.fetch_failed))
    }

    pub async fn create(&self, state: &ServerState, body: Document) -> Result<Document, ServerError> {
        let document = state
            .engine
            .insert(self.collection, body)
            .await
            .map_err(|err| ServerError::from_engine(err, self.not_found, self.create_failed))?;
        tracing::info!(collection = self.collection.name(), "document created");
        Ok(document)
    }

    pub async fn update(
        &self,
        state: &ServerState,
        id: &str,
        updates: Document,
    ) -> Result<Document, ServerError> {
        state
            .engine
            .update_by_id(self.collection, id, updates)
            .await
            .map_err(|err| ServerError::from_engine(err, self.not_found, self.update_failed))
    }

    pub async fn delete(&self, state: &ServerState, id: &str) -> Result<MessageResponse, ServerError> {
        state
            .engine
            .delete_by_id(self.collection, id)
            .await
            .map_err(|err| ServerError::from_engine(err, self.not_found, self.delete_failed))?;
        tracing::info!(collection = self.collection.name(), id, "document deleted");
        Ok(MessageResponse {
            message: self.deleted.to_string(),
        })
    }
}
