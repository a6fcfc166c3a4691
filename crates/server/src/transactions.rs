//! Transaction API endpoints

use api_types::{
    Document, MessageResponse,
    transaction::{TransactionListResponse, TransactionResponse},
};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::Collection;

use crate::{ServerError, documents::Resource, server::ServerState};

const TRANSACTIONS: Resource = Resource {
    collection: Collection::Transactions,
    not_found: "Transaction not found",
    fetch_failed: "Failed to fetch transactions",
    create_failed: "Failed to create transaction",
    update_failed: "Failed to update transaction",
    delete_failed: "Failed to delete transaction",
    deleted: "Transaction deleted successfully",
};

/// Handle requests for listing every transaction
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse<Document>>, ServerError> {
    let transactions = TRANSACTIONS.list(&state).await?;
    Ok(Json(TransactionListResponse { transactions }))
}

/// Handle requests for storing a new transaction, as sent
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Document>,
) -> Result<Json<TransactionResponse<Document>>, ServerError> {
    let transaction = TRANSACTIONS.create(&state, payload).await?;
    Ok(Json(TransactionResponse { transaction }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Document>,
) -> Result<Json<TransactionResponse<Document>>, ServerError> {
    let transaction = TRANSACTIONS.update(&state, &id, payload).await?;
    Ok(Json(TransactionResponse { transaction }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    Ok(Json(TRANSACTIONS.delete(&state, &id).await?))
}
