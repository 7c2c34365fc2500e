//! GitHub projects record definitions
//!
//! Typed records for the classic projects API, decoded from the raw JSON
//! values the client returns, plus the request bodies the sync sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A classic project board.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A column (lane) of a project board.
#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A card in a column.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: u64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of a create-project request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Body of a create-column request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateColumnRequest {
    pub name: String,
}

/// Body of a create-card request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCardRequest {
    pub note: String,
}
