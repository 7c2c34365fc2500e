//! The list-to-board sync workflow
//!
//! A fixed sequence: resolve the source list, find or create the target
//! project and column, optionally clear the column, then copy one card
//! per task. Every request is awaited before the next is issued; a
//! failure partway through leaves the cards created so far in place.

use tracing::info;

use crate::config::SyncOptions;
use crate::github::GithubClient;
use crate::wunderlist::{Comment, WunderlistClient};
use crate::Result;

/// Cards keep at most this many characters of note text.
const NOTE_LIMIT: usize = 250;

/// Name given to the column created in a project that has none.
const DEFAULT_COLUMN: &str = "Backlog";

/// What one sync run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub project_created: bool,
    pub column_created: bool,
    pub cards_deleted: usize,
    pub cards_created: usize,
}

/// Copy the configured list into the configured board column.
pub async fn run(
    options: &SyncOptions,
    source: &WunderlistClient,
    board: &GithubClient,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    info!("Syncing Wunderlist list: {}", options.list);
    let list = source.find_list(&options.list).await?;

    let project_name = options.project_name.as_deref().unwrap_or(&list.title);
    let projects = board.projects().await?;
    let project = match projects.into_iter().find(|p| p.name == project_name) {
        Some(project) => project,
        None => {
            info!("Creating project: {}", project_name);
            report.project_created = true;
            board.create_project(project_name).await?
        }
    };

    let columns = board.columns(project.id).await?;
    let found = match &options.column_name {
        Some(name) => columns.into_iter().find(|c| &c.name == name),
        None => columns.into_iter().next(),
    };
    let column = match found {
        Some(column) => column,
        None => {
            let name = options.column_name.as_deref().unwrap_or(DEFAULT_COLUMN);
            info!("Creating column: {}", name);
            report.column_created = true;
            board.create_column(project.id, name).await?
        }
    };

    let cards = board.cards(column.id).await?;
    if options.delete_cards {
        info!("Clearing {} old cards", cards.len());
        for card in &cards {
            board.delete_card(card.id).await?;
        }
        report.cards_deleted = cards.len();
    }

    for task in source.tasks(list.id).await? {
        info!("Creating card: {}", task.title);
        let content = source.note_content(task.id).await;
        let comments = source.comments(task.id).await?;
        let note = compose_note(&task.title, &content, &comments);
        board.create_card(column.id, &note).await?;
        report.cards_created += 1;
    }

    Ok(report)
}

/// Build a card note from a task: title, note body and joined comments on
/// separate lines, cut to the first `NOTE_LIMIT` characters.
fn compose_note(title: &str, note_content: &str, comments: &[Comment]) -> String {
    let mut note = String::from(title);
    note.push('\n');
    note.push_str(note_content);
    note.push('\n');
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    note.push_str(&texts.join("\n"));
    truncate_chars(note, NOTE_LIMIT)
}

/// Cut to the first `limit` characters, never splitting a code point.
fn truncate_chars(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}
