//! Sync configuration
//!
//! An immutable options value built once by the binary and threaded by
//! reference through the workflow.

/// Where the target project board lives on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardTarget {
    /// Organization-scoped project board
    Org(String),
    /// Repository-scoped project board
    Repo { user: String, repo: String },
}

impl BoardTarget {
    /// Path of the projects collection for this target, rooted at the API host.
    pub fn base_path(&self) -> String {
        match self {
            BoardTarget::Org(org) => format!("/orgs/{}/projects", org),
            BoardTarget::Repo { user, repo } => format!("/repos/{}/{}/projects", user, repo),
        }
    }
}

/// Options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Wunderlist application client id
    pub client_id: String,
    /// Wunderlist access token
    pub access_token: String,
    /// GitHub OAuth token
    pub github_token: String,
    /// Where the project board lives
    pub target: BoardTarget,
    /// Title of the Wunderlist list to copy
    pub list: String,
    /// Project to sync into; defaults to the list title
    pub project_name: Option<String>,
    /// Column to sync into; defaults to the project's first column
    pub column_name: Option<String>,
    /// Delete existing cards in the target column before syncing
    pub delete_cards: bool,
}
