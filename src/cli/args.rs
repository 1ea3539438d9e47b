//! Defines the command-line arguments and subcommands for the category-tree CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorMode;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "category-tree",
    version,
    about = "Build, search and inspect product category hierarchies."
)]
pub struct CategoryTreeArgs {
    /// YAML configuration file (defaults to ./category-tree.yaml if present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// When to color output.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Spaces per tree level.
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(1..))]
    pub indent: Option<u16>,

    /// Hide inactive categories and their subcategories.
    #[arg(long, global = true)]
    pub hide_inactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for commands that print data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the full category tree.
    Tree {
        /// Category listing (JSON array or `{ success, categories }` response).
        #[arg(required = true)]
        file: PathBuf,
        /// Show root categories only.
        #[arg(long)]
        collapsed: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show the categories matching a query, with their ancestors.
    Search {
        #[arg(required = true)]
        file: PathBuf,
        /// Case-insensitive text searched in name, description and path.
        query: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print totals for the category tree.
    Stats {
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Report orphaned, cyclic and duplicate categories; fails if any are found.
    Check {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// List the categories that can be chosen as parent.
    Parents {
        #[arg(required = true)]
        file: PathBuf,
        /// Category being edited; it and its subcategories are excluded.
        #[arg(long = "for", value_name = "ID")]
        for_id: Option<String>,
    },
}
