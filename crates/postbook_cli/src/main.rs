//! Command-line front end for the posts store.
//!
//! # Responsibility
//! - Map user actions (list, search, add, delete) onto `RecordStore` calls.
//! - Reject incomplete input locally before the store is touched.
//! - Render posts as a table or as JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use postbook_core::{
    default_log_level, init_logging, Post, PostId, RecordStore, StoreLocation,
    DEFAULT_DB_FILE_NAME,
};
use std::path::PathBuf;

const COLUMN_HEADERS: [&str; 4] = ["ID", "User ID", "Title", "Body"];

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Manage a local collection of posts", long_about = None)]
struct Cli {
    /// Database file (`:memory:` for a throwaway store)
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE_NAME)]
    db: String,

    /// Print posts as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); needs --log-dir
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every post
    List,

    /// Show posts whose title contains FRAGMENT (case-insensitive)
    Search {
        /// Text to look for; empty shows everything
        #[arg(default_value = "")]
        fragment: String,
    },

    /// Add a post, then show the refreshed listing
    Add {
        /// Author reference
        #[arg(long)]
        user_id: String,

        /// Post title, searchable with `search`
        #[arg(long)]
        title: String,

        /// Post text
        #[arg(long)]
        body: String,
    },

    /// Delete the post with ID, then show the refreshed listing
    Delete {
        /// Id of the selected post
        id: PostId,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Search { .. } => "search",
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );

    let location = StoreLocation::parse(&cli.db);
    let store = RecordStore::open(location.clone())
        .with_context(|| format!("cannot open post store at `{location}`"))?;

    let posts = match cli.command {
        Commands::List => store.list_all()?,
        Commands::Search { fragment } => store.search_by_title(&fragment)?,
        Commands::Add {
            user_id,
            title,
            body,
        } => {
            let form = AddForm::parse(&user_id, &title, &body)?;
            let id = store.insert(form.user_id, form.title, form.body)?;
            eprintln!("Added post {id}");
            store.list_all()?
        }
        Commands::Delete { id } => {
            if store.delete(id)? {
                eprintln!("Deleted post {id}");
            } else {
                eprintln!("No post with id {id}");
            }
            store.list_all()?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else {
        print!("{}", render_table(&posts));
    }

    Ok(())
}

/// Add-form input after local checks.
#[derive(Debug, PartialEq, Eq)]
struct AddForm<'a> {
    user_id: i64,
    title: &'a str,
    body: &'a str,
}

impl<'a> AddForm<'a> {
    /// All fields must be filled in; `user_id` must be an integer.
    fn parse(user_id: &str, title: &'a str, body: &'a str) -> Result<Self> {
        if user_id.trim().is_empty() || title.trim().is_empty() || body.trim().is_empty() {
            bail!("all fields must be filled in");
        }
        let user_id = user_id
            .trim()
            .parse::<i64>()
            .with_context(|| format!("user id `{}` is not an integer", user_id.trim()))?;
        Ok(Self {
            user_id,
            title,
            body,
        })
    }
}

fn render_table(posts: &[Post]) -> String {
    let rows: Vec<[String; 4]> = posts
        .iter()
        .map(|post| {
            [
                post.id.to_string(),
                post.user_id.to_string(),
                single_line(&post.title),
                single_line(&post.body),
            ]
        })
        .collect();

    let mut widths = COLUMN_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMN_HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}
