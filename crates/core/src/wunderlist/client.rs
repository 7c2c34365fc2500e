//! Wunderlist HTTP API client
//!
//! Read-only access to the pieces of the v1 API the sync needs. Every
//! request carries the `X-Client-ID` / `X-Access-Token` header pair.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{body_excerpt, Error};
use crate::Result;

use super::model::{Comment, List, Note, Task};

const DEFAULT_BASE_URL: &str = "https://a.wunderlist.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Wunderlist v1 REST API.
pub struct WunderlistClient {
    client: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
}

impl WunderlistClient {
    /// Create a client against the production API.
    pub fn new(client_id: &str, access_token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, client_id, access_token)
    }

    /// Create a client against an arbitrary host. Used by tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        client_id: &str,
        access_token: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Client-ID",
            HeaderValue::from_str(client_id)
                .map_err(|_| Error::InvalidConfig("client id is not a valid header value".into()))?,
        );
        headers.insert(
            "X-Access-Token",
            HeaderValue::from_str(access_token).map_err(|_| {
                Error::InvalidConfig("access token is not a valid header value".into())
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            headers,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// All lists visible to the authenticated user.
    pub async fn lists(&self) -> Result<Vec<List>> {
        let value = self.get("/api/v1/lists").await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve a list by exact title match.
    pub async fn find_list(&self, title: &str) -> Result<List> {
        let lists = self.lists().await?;
        lists
            .into_iter()
            .find(|list| list.title == title)
            .ok_or_else(|| Error::ListNotFound(title.to_string()))
    }

    /// Open tasks of a list, in the order the API returns them.
    pub async fn tasks(&self, list_id: u64) -> Result<Vec<Task>> {
        let value = self.get(&format!("/api/v1/tasks?list_id={}", list_id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Content of a task's note, best effort.
    ///
    /// Anything that goes wrong reading the note degrades to an empty
    /// string; the sync keeps going.
    pub async fn note_content(&self, task_id: u64) -> String {
        match self.try_note_content(task_id).await {
            Ok(content) => content,
            Err(err) => {
                warn!("ignoring unreadable note for task {}: {}", task_id, err);
                String::new()
            }
        }
    }

    async fn try_note_content(&self, task_id: u64) -> Result<String> {
        let value = self.get(&format!("/api/v1/notes?task_id={}", task_id)).await?;
        let notes: Vec<Note> = serde_json::from_value(value)?;
        Ok(notes.into_iter().next().map(|note| note.content).unwrap_or_default())
    }

    /// Comments on a task, in the order the API returns them.
    pub async fn comments(&self, task_id: u64) -> Result<Vec<Comment>> {
        let value = self
            .get(&format!("/api/v1/task_comments?task_id={}", task_id))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get(&self, path_and_query: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                path: path_and_query.to_string(),
                body: body_excerpt(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
