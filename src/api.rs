//! Client for the remote expense API.
//!
//! [ExpenseApi] is the port the sync controller talks to; [HttpExpenseApi]
//! is the reqwest adapter for the REST endpoints:
//!
//! - `GET {base}/expenses/{user_id}` lists a user's expenses.
//! - `POST {base}/expenses` creates an expense and returns it with its ID.
//! - `DELETE {base}/expenses/{user_id}/{expense_id}` deletes an expense.
//!
//! Any non-2xx response is a failure. The response body of a delete is ignored.
//! A listed record that does not decode is skipped with a warning rather than
//! failing the whole list.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::expense::{Expense, ExpenseId, NewExpense};

/// The ways a call to the remote expense API can fail.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("could not reach the expense API: {0}")]
    Transport(String),

    /// The expense API answered with a non-2xx status code.
    #[error("the expense API responded with status {0}")]
    Status(u16),

    /// The response body was not the JSON that was expected.
    #[error("could not decode the expense API response: {0}")]
    Decode(String),

    /// The base URL cannot have path segments appended to it.
    #[error("the expense API URL {0} cannot be used as a base URL")]
    InvalidUrl(String),
}

/// The remote store that owns the user's expenses.
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// Fetch all of `user_id`'s expenses.
    async fn fetch_expenses(&self, user_id: &str) -> Result<Vec<Expense>, ApiError>;

    /// Create an expense, returning the stored record with its assigned ID.
    async fn create_expense(&self, draft: &NewExpense) -> Result<Expense, ApiError>;

    /// Delete the expense `expense_id` owned by `user_id`.
    async fn delete_expense(&self, user_id: &str, expense_id: &ExpenseId) -> Result<(), ApiError>;
}

/// [ExpenseApi] over HTTP.
///
/// No request timeout is set, requests use reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpExpenseApi {
    client: Client,
    base_url: Url,
}

impl HttpExpenseApi {
    /// Create a client for the expense API rooted at `base_url`,
    /// e.g. "https://example.com/prod".
    ///
    /// # Errors
    ///
    /// Returns [ApiError::InvalidUrl] if `base_url` cannot take path segments
    /// (e.g., "mailto:someone@example.com").
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// The URL for the path made of `segments` under the base URL.
    ///
    /// Each segment is percent-encoded.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn fetch_expenses(&self, user_id: &str) -> Result<Vec<Expense>, ApiError> {
        let url = self.url_for(&["expenses", user_id])?;
        tracing::debug!("fetching expenses from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let records: Vec<serde_json::Value> = parse_json(check_status(response)?).await?;

        Ok(decode_expenses(records))
    }

    async fn create_expense(&self, draft: &NewExpense) -> Result<Expense, ApiError> {
        let url = self.url_for(&["expenses"])?;
        tracing::debug!("creating expense at {url}");

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(map_transport_error)?;

        parse_json(check_status(response)?).await
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &ExpenseId) -> Result<(), ApiError> {
        let url = self.url_for(&["expenses", user_id, expense_id.as_str()])?;
        tracing::debug!("deleting expense at {url}");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response).map(|_| ())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        Err(map_status_error(status))
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(map_transport_error)?;

    serde_json::from_slice(&body).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Decode each listed record on its own, dropping the ones that do not match
/// the [Expense] schema.
fn decode_expenses(records: Vec<serde_json::Value>) -> Vec<Expense> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Expense>(record) {
            Ok(expense) => Some(expense),
            Err(error) => {
                tracing::warn!("skipping expense record that could not be decoded: {error}");
                None
            }
        })
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

fn map_status_error(status: StatusCode) -> ApiError {
    ApiError::Status(status.as_u16())
}
