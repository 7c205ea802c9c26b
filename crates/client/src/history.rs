//! Generation history as seen from the client.
//!
//! [`HistoryClient`] wraps the `/api/v1/history` endpoints. [`HistoryView`]
//! keeps the list a page shows and only changes it after the server
//! confirms a change.

use pixmorph_core::types::{RecordId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::dispatcher::failure_parts;
use crate::error::ClientError;
use crate::session::Session;

/// One saved generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: RecordId,
    pub user_id: UserId,
    pub original_image_url: Option<String>,
    pub generated_image_url: String,
    pub prompt: String,
    pub created_at: Timestamp,
}

/// Body of `POST /api/v1/history`.
#[derive(Debug, Clone, Serialize)]
pub struct NewHistoryEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_image_url: Option<&'a str>,
    pub generated_image_url: &'a str,
    pub prompt: &'a str,
}

#[derive(Deserialize)]
struct DataResponse<T> {
    data: T,
}

#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: reqwest::Client,
    base: String,
}

impl HistoryClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base: format!("{}/api/v1/history", base_url.trim_end_matches('/')),
        }
    }

    /// The caller's entries, newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .http
            .get(&self.base)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: DataResponse<Vec<HistoryEntry>> = response.json().await?;
        Ok(body.data)
    }

    pub async fn insert(
        &self,
        session: &Session,
        entry: &NewHistoryEntry<'_>,
    ) -> Result<HistoryEntry, ClientError> {
        let response = self
            .http
            .post(&self.base)
            .bearer_auth(&session.access_token)
            .json(entry)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: DataResponse<HistoryEntry> = response.json().await?;
        Ok(body.data)
    }

    pub async fn delete(&self, session: &Session, id: RecordId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/{id}", self.base))
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let (status, message) = failure_parts(response).await;
    tracing::warn!(status, message = %message, "History request failed");
    Err(ClientError::History { status, message })
}

/// The history list shown on the history page.
#[derive(Debug)]
pub struct HistoryView {
    client: HistoryClient,
    entries: Vec<HistoryEntry>,
}

impl HistoryView {
    pub fn new(client: HistoryClient) -> Self {
        Self {
            client,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Reload the list. On failure the previous list is kept.
    pub async fn refresh(&mut self, session: &Session) -> Result<&[HistoryEntry], ClientError> {
        self.entries = self.client.list(session).await?;
        Ok(&self.entries)
    }

    /// Delete one entry. The local list loses exactly that entry, and only
    /// once the server has confirmed.
    pub async fn delete(&mut self, session: &Session, id: RecordId) -> Result<(), ClientError> {
        self.client.delete(session, id).await?;
        self.entries.retain(|e| e.id != id);
        tracing::info!(history_id = %id, "History entry removed");
        Ok(())
    }
}
