//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use libris_app::services::query::{QueryOptions, Sort};

use crate::config;

/// Administer the library catalogue through its REST API.
#[derive(Debug, Parser)]
#[command(name = "librisctl", version, about)]
pub struct Cli {
    /// Configuration file.
    #[arg(long, short, env = "LIBRIS_CONFIG", default_value = config::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Resource to work on.
    #[arg(value_enum)]
    pub entity: EntityKind,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Books,
    Borrowings,
    Spaces,
    Categories,
    Users,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List one page of entities.
    List(ListArgs),
    /// Show one entity; an empty id shows a blank form.
    Get { id: String },
    /// Create an entity from a JSON document without an `id`.
    Create { json: String },
    /// Replace an entity from a JSON document carrying its `id`.
    Update { json: String },
    /// Change only the fields present in a JSON document carrying its `id`.
    Patch { json: String },
    /// Create or update, depending on whether the document has an `id`.
    Save { json: String },
    /// Delete an entity.
    Delete { id: String },
    /// List selectable entities, keeping the current selection among them.
    Options {
        /// Identifier of the currently selected entity.
        #[arg(long)]
        selected: Option<String>,
    },
}

impl Action {
    /// Whether the action changes data on the server.
    #[must_use]
    pub fn writes(&self) -> bool {
        matches!(
            self,
            Self::Create { .. }
                | Self::Update { .. }
                | Self::Patch { .. }
                | Self::Save { .. }
                | Self::Delete { .. }
        )
    }
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Zero-based page index.
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size.
    #[arg(long)]
    pub size: Option<u32>,

    /// Sort key, `property` or `property,asc|desc`; repeatable.
    #[arg(long)]
    pub sort: Vec<Sort>,

    /// Filter criterion, `key=value` (e.g. `title.contains=dune`); repeatable.
    #[arg(long = "filter", value_parser = parse_criterion)]
    pub criteria: Vec<(String, String)>,
}

impl ListArgs {
    #[must_use]
    pub fn options(&self) -> QueryOptions {
        let mut options = QueryOptions::new();
        options.page = self.page;
        options.size = self.size;
        options.sort.clone_from(&self.sort);
        options.criteria.clone_from(&self.criteria);
        options
    }
}

fn parse_criterion(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected `key=value`, got `{raw}`")),
    }
}
