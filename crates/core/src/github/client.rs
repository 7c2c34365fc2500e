//! GitHub projects API client
//!
//! A single-method REST client that follows `Link: rel="next"` pagination
//! transparently, plus typed wrappers for the handful of endpoints the
//! sync touches.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::BoardTarget;
use crate::error::{body_excerpt, Error};
use crate::Result;

use super::link::next_page_path;
use super::model::{
    Card, Column, CreateCardRequest, CreateColumnRequest, CreateProjectRequest, Project,
};

const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// The classic projects API shipped behind a preview flag and requires
/// this accept header on every request.
const PREVIEW_ACCEPT: &str = "application/vnd.github.inertia-preview+json";

/// Pages an endpoint may hand out before the client refuses to follow more.
const MAX_PAGES: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Statuses treated as success; anything else fails the call.
const ALLOWED_STATUSES: [StatusCode; 3] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NO_CONTENT,
];

/// Client for the classic projects endpoints of the GitHub REST API.
pub struct GithubClient {
    client: reqwest::Client,
    headers: HeaderMap,
    api_root: String,
    base_path: String,
}

impl GithubClient {
    /// Create a client against the production API.
    pub fn new(token: &str, target: &BoardTarget) -> Result<Self> {
        Self::with_api_root(DEFAULT_API_ROOT, token, target)
    }

    /// Create a client against an arbitrary host. Used by tests.
    pub fn with_api_root(
        api_root: impl Into<String>,
        token: &str,
        target: &BoardTarget,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
                Error::InvalidConfig("GitHub token is not a valid header value".into())
            })?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("wl2board"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(PREVIEW_ACCEPT));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            headers,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            base_path: target.base_path(),
        })
    }

    /// Issue a request and follow `rel="next"` pagination to exhaustion.
    ///
    /// With no `path` the request targets the configured projects
    /// collection; an explicit path is rooted at the API host. Array
    /// responses from paginated endpoints come back flattened into one
    /// array in page order. An empty body (204) decodes to `Value::Null`.
    pub async fn call(
        &self,
        method: Method,
        path: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value> {
        let path = match path {
            Some(path) => rooted(path),
            None => self.base_path.clone(),
        };

        let (mut result, mut next) = self.request(method, &path, body).await?;

        let mut pages = 1;
        while let Some(next_path) = next {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(Error::PageLimit(MAX_PAGES));
            }

            debug!("following pagination to {}", next_path);
            let (page, link) = self.request(Method::GET, &next_path, None).await?;
            match (result.as_array_mut(), page) {
                (Some(items), Value::Array(mut more)) => items.append(&mut more),
                _ => return Err(Error::UnexpectedPayload(next_path)),
            }
            next = link;
        }

        Ok(result)
    }

    /// All projects of the configured org or repository.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let value = self.call(Method::GET, None, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a project on the configured org or repository.
    pub async fn create_project(&self, name: &str) -> Result<Project> {
        let body = serde_json::to_value(CreateProjectRequest {
            name: name.to_string(),
        })?;
        let value = self.call(Method::POST, None, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// All columns of a project.
    pub async fn columns(&self, project_id: u64) -> Result<Vec<Column>> {
        let path = format!("projects/{}/columns", project_id);
        let value = self.call(Method::GET, Some(&path), None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a column in a project.
    pub async fn create_column(&self, project_id: u64, name: &str) -> Result<Column> {
        let path = format!("projects/{}/columns", project_id);
        let body = serde_json::to_value(CreateColumnRequest {
            name: name.to_string(),
        })?;
        let value = self.call(Method::POST, Some(&path), Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// All cards of a column.
    pub async fn cards(&self, column_id: u64) -> Result<Vec<Card>> {
        let path = format!("projects/columns/{}/cards", column_id);
        let value = self.call(Method::GET, Some(&path), None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Delete a card.
    pub async fn delete_card(&self, card_id: u64) -> Result<()> {
        let path = format!("projects/columns/cards/{}", card_id);
        self.call(Method::DELETE, Some(&path), None).await?;
        Ok(())
    }

    /// Create a card in a column.
    pub async fn create_card(&self, column_id: u64, note: &str) -> Result<Card> {
        let path = format!("projects/columns/{}/cards", column_id);
        let body = serde_json::to_value(CreateCardRequest {
            note: note.to_string(),
        })?;
        let value = self.call(Method::POST, Some(&path), Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(Value, Option<String>)> {
        let url = format!("{}{}", self.api_root, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url).headers(self.headers.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_path);
        let text = response.text().await?;

        if !ALLOWED_STATUSES.contains(&status) {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                path: path.to_string(),
                body: body_excerpt(&text),
            });
        }

        if text.is_empty() {
            return Ok((Value::Null, next));
        }
        Ok((serde_json::from_str(&text)?, next))
    }
}

fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
