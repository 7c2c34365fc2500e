//! Wunderlist record definitions
//!
//! Stable local records decoded from the raw API payloads. Only the fields
//! the sync reads are kept; everything else in the payload is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A named collection of tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct List {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revision: Option<u64>,
}

/// A single to-do item in a list.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Free-form note attached to a task.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub content: String,
}

/// A comment on a task.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub text: String,
}
