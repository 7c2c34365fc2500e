//! wl2board binary
//!
//! Copies the tasks of a Wunderlist list into a column of a GitHub
//! project board. Credentials and board coordinates come from flags or
//! their environment fallbacks; the list title is positional.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wl2board_core::config::{BoardTarget, SyncOptions};
use wl2board_core::github::GithubClient;
use wl2board_core::sync;
use wl2board_core::wunderlist::WunderlistClient;

/// Sync a Wunderlist list to a GitHub project board.
#[derive(Parser, Debug)]
#[command(name = "wl2board")]
#[command(about = "Copies a Wunderlist list into a GitHub project board column")]
struct Args {
    /// Wunderlist application client id.
    #[arg(short, long, env = "WL_CLIENT_ID")]
    client_id: String,

    /// Wunderlist access token.
    #[arg(short = 's', long, env = "WL_CLIENT_SECRET")]
    client_secret: String,

    /// GitHub OAuth token.
    #[arg(short, long, env = "GITHUB_TOKEN")]
    token: String,

    /// GitHub organization owning the project board.
    #[arg(short, long, env = "GITHUB_ORG")]
    org: Option<String>,

    /// GitHub user owning the repository (needs --repo).
    #[arg(short, long, env = "GITHUB_USER")]
    user: Option<String>,

    /// GitHub repository the project board belongs to (needs --user).
    #[arg(short, long, env = "GITHUB_REPO")]
    repo: Option<String>,

    /// Project to sync into. Defaults to the list title.
    #[arg(long)]
    project_name: Option<String>,

    /// Column to sync into. Defaults to the project's first column.
    #[arg(long)]
    column: Option<String>,

    /// Delete existing cards in the target column before syncing.
    #[arg(long)]
    delete_cards: bool,

    /// Title of the Wunderlist list to copy.
    list: String,
}

impl Args {
    /// Resolve the board target. An organization wins over user/repo when
    /// both are present (environment fallbacks make that easy to hit).
    fn board_target(&self) -> BoardTarget {
        if let Some(org) = &self.org {
            return BoardTarget::Org(org.clone());
        }
        if let (Some(user), Some(repo)) = (&self.user, &self.repo) {
            return BoardTarget::Repo {
                user: user.clone(),
                repo: repo.clone(),
            };
        }
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "set --org, or both --user and --repo",
            )
            .exit()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wl2board=info,wl2board_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let target = args.board_target();

    let options = SyncOptions {
        client_id: args.client_id,
        access_token: args.client_secret,
        github_token: args.token,
        target,
        list: args.list,
        project_name: args.project_name,
        column_name: args.column,
        delete_cards: args.delete_cards,
    };

    let source = WunderlistClient::new(&options.client_id, &options.access_token)
        .context("building Wunderlist client")?;
    let board = GithubClient::new(&options.github_token, &options.target)
        .context("building GitHub client")?;

    let report = sync::run(&options, &source, &board)
        .await
        .context("sync failed")?;

    tracing::info!(
        "Done: {} cards created, {} cards deleted",
        report.cards_created,
        report.cards_deleted
    );
    Ok(())
}
