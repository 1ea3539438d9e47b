//! The category-tree Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::api::load_categories;
use crate::cli::args::{CategoryTreeArgs, Command, Format};
use crate::cli::output::RenderOptions;
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::model::CategoryNode;
use crate::logging;
use crate::tree::{
    build_tree_with_report, eligible_parents, filter_tree, find, flatten, retain_active,
    ExpansionState, TreeStats, Visibility,
};

pub mod args;
pub mod output;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = CategoryTreeArgs::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            logging::init("warn");
            print_error(e);
            process::exit(1);
        }
    };
    logging::init(&logging::level_for(&config.log_level, args.verbose));

    let mut stdout = StandardStream::stdout(ColorChoice::from(config.color));
    match execute(args.command, &config, &mut stdout) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

/// Config file values with command-line overrides applied.
pub fn resolve_config(args: &CategoryTreeArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(color) = args.color {
        config.color = color;
    }
    if let Some(indent) = args.indent {
        config.indent = usize::from(indent);
    }
    if args.hide_inactive {
        config.show_inactive = false;
    }
    Ok(config)
}

/// Runs one subcommand, writing to `out`.
///
/// `Ok(false)` means the command ran but found problems (`check`).
pub fn execute<W: WriteColor>(command: Command, config: &Config, out: &mut W) -> Result<bool> {
    let options = RenderOptions {
        indent: config.indent,
        show_product_counts: config.show_product_counts,
    };

    match command {
        Command::Tree {
            file,
            collapsed,
            format,
        } => {
            let forest = load_forest(&file, config)?;
            match format {
                Format::Json => output::print_json(out, &forest).map_err(stdout_error)?,
                Format::Text => {
                    let mut state = ExpansionState::new();
                    if !collapsed {
                        state.expand_all(&forest);
                    }
                    let rows = flatten(&forest, Visibility::Expanded(&state));
                    output::print_rows(out, &rows, &options, None).map_err(stdout_error)?;
                }
            }
        }

        Command::Search {
            file,
            query,
            format,
        } => {
            let forest = load_forest(&file, config)?;
            let matches = filter_tree(&forest, &query);
            match format {
                Format::Json => output::print_json(out, &matches).map_err(stdout_error)?,
                Format::Text if matches.is_empty() => {
                    writeln!(out, "No categories match '{query}'.").map_err(stdout_error)?;
                }
                Format::Text => {
                    let rows = flatten(&matches, Visibility::All);
                    output::print_rows(out, &rows, &options, Some(&query))
                        .map_err(stdout_error)?;
                }
            }
        }

        Command::Stats { file, format } => {
            let forest = load_forest(&file, config)?;
            let stats = TreeStats::collect(&forest);
            let written = match format {
                Format::Json => output::print_json(out, &stats),
                Format::Text => output::print_stats(out, &stats),
            };
            written.map_err(stdout_error)?;
        }

        Command::Check { file } => {
            let categories = load_categories(&file)?;
            let (_, report) = build_tree_with_report(&categories);
            return output::print_report(out, &report).map_err(stdout_error);
        }

        Command::Parents { file, for_id } => {
            let categories = load_categories(&file)?;
            let (forest, _) = build_tree_with_report(&categories);
            if let Some(id) = for_id.as_deref() {
                if find(&forest, id).is_none() {
                    return Err(Error::UnknownCategory { id: id.to_string() });
                }
            }
            let forest = visible(forest, config);
            let parents = eligible_parents(&forest, for_id.as_deref());
            output::print_parents(out, &parents, config.indent).map_err(stdout_error)?;
        }
    }
    Ok(true)
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Builds the forest and applies `show_inactive`.
fn load_forest(file: &Path, config: &Config) -> Result<Vec<CategoryNode>> {
    let categories = load_categories(file)?;
    let (forest, _) = build_tree_with_report(&categories);
    Ok(visible(forest, config))
}

fn visible(forest: Vec<CategoryNode>, config: &Config) -> Vec<CategoryNode> {
    if config.show_inactive {
        forest
    } else {
        retain_active(&forest)
    }
}

fn stdout_error(e: std::io::Error) -> Error {
    Error::io(PathBuf::from("<stdout>"), e)
}

/// Prints an error with full miette diagnostics.
pub fn print_error(error: Error) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
