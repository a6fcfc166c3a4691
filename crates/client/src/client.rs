//! HTTP client for the REST API.

use api_types::{
    Document, ErrorResponse, MessageResponse,
    budget::{Budget, BudgetListResponse, BudgetNew, BudgetResponse, BudgetUpdate},
    transaction::{
        Transaction, TransactionListResponse, TransactionNew, TransactionResponse,
        TransactionUpdate,
    },
};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Server(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// `base_url` points at the API root, e.g. `http://127.0.0.1:3000/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|err| AppError::InvalidInput(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let res = request.send().await?;

        if res.status().is_success() {
            return Ok(res.json::<T>().await?);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| format!("unexpected status {status}"));
        tracing::debug!(%status, "request failed: {body}");

        let err = match status.as_u16() {
            404 => ClientError::NotFound,
            _ => ClientError::Server(body),
        };
        Err(err)
    }

    /// Every stored transaction, as raw documents.
    pub async fn transactions(&self) -> std::result::Result<Vec<Document>, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        let res: TransactionListResponse<Document> = self.send(self.http.get(endpoint)).await?;
        Ok(res.transactions)
    }

    pub async fn transaction_create(
        &self,
        payload: &TransactionNew,
    ) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        let res: TransactionResponse = self.send(self.http.post(endpoint).json(payload)).await?;
        Ok(res.transaction)
    }

    pub async fn transaction_update(
        &self,
        id: &str,
        payload: &TransactionUpdate,
    ) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res: TransactionResponse = self.send(self.http.put(endpoint).json(payload)).await?;
        Ok(res.transaction)
    }

    pub async fn transaction_delete(&self, id: &str) -> std::result::Result<String, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res: MessageResponse = self.send(self.http.delete(endpoint)).await?;
        Ok(res.message)
    }

    /// Every stored budget, as raw documents.
    pub async fn budgets(&self) -> std::result::Result<Vec<Document>, ClientError> {
        let endpoint = self.endpoint("budgets")?;
        let res: BudgetListResponse<Document> = self.send(self.http.get(endpoint)).await?;
        Ok(res.budgets)
    }

    pub async fn budget_create(
        &self,
        payload: &BudgetNew,
    ) -> std::result::Result<Budget, ClientError> {
        let endpoint = self.endpoint("budgets")?;
        let res: BudgetResponse = self.send(self.http.post(endpoint).json(payload)).await?;
        Ok(res.budget)
    }

    pub async fn budget_update(
        &self,
        id: &str,
        payload: &BudgetUpdate,
    ) -> std::result::Result<Budget, ClientError> {
        let endpoint = self.endpoint(&format!("budgets/{id}"))?;
        let res: BudgetResponse = self.send(self.http.put(endpoint).json(payload)).await?;
        Ok(res.budget)
    }

    pub async fn budget_delete(&self, id: &str) -> std::result::Result<String, ClientError> {
        let endpoint = self.endpoint(&format!("budgets/{id}"))?;
        let res: MessageResponse = self.send(self.http.delete(endpoint)).await?;
        Ok(res.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = Client::new("http://127.0.0.1:3000/api").unwrap();
        assert_eq!(
            client.endpoint("budgets/b1").unwrap().as_str(),
            "http://127.0.0.1:3000/api/budgets/b1"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
