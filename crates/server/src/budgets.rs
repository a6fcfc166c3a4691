//! Budget API endpoints

use api_types::{
    Document, MessageResponse,
    budget::{BudgetListResponse, BudgetResponse},
};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::Collection;

use crate::{ServerError, documents::Resource, server::ServerState};

const BUDGETS: Resource = Resource {
    collection: Collection::Budgets,
    not_found: "Budget not found",
    fetch_failed: "Failed to fetch budgets",
    create_failed: "Failed to create budget",
    update_failed: "Failed to update budget",
    delete_failed: "Failed to delete budget",
    deleted: "Budget deleted successfully",
};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse<Document>>, ServerError> {
    let budgets = BUDGETS.list(&state).await?;
    Ok(Json(BudgetListResponse { budgets }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Document>,
) -> Result<Json<BudgetResponse<Document>>, ServerError> {
    let budget = BUDGETS.create(&state, payload).await?;
    Ok(Json(BudgetResponse { budget }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Document>,
) -> Result<Json<BudgetResponse<Document>>, ServerError> {
    let budget = BUDGETS.update(&state, &id, payload).await?;
    Ok(Json(BudgetResponse { budget }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    Ok(Json(BUDGETS.delete(&state, &id).await?))
}
