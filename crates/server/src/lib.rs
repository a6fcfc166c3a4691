use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budgets;
mod documents;
mod server;
mod transactions;

pub enum ServerError {
    /// No document matched the requested `id`.
    NotFound(&'static str),
    /// The store failed; `message` is what the client sees.
    Store {
        message: &'static str,
        source: EngineError,
    },
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl ServerError {
    /// Classify an engine failure for the operation described by `message`.
    pub(crate) fn from_engine(err: EngineError, not_found: &'static str, message: &'static str) -> Self {
        match err {
            EngineError::KeyNotFound(_) => Self::NotFound(not_found),
            source => Self::Store { message, source },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ServerError::Store { message, source } => {
                tracing::error!("{message}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (
            status,
            Json(Error {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from_engine(
            EngineError::KeyNotFound("x".to_string()),
            "Budget not found",
            "Failed to update budget",
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let res = ServerError::from_engine(
            EngineError::InvalidDocument("broken".to_string()),
            "Budget not found",
            "Failed to update budget",
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
