//! Handles all user-facing output for the CLI.
//!
//! Everything is written to a `WriteColor` so commands print to a colored
//! stdout while tests capture into an uncolored `termcolor::Buffer`.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::model::Category;
use crate::tree::{BuildReport, TreeRow, TreeStats};

/// Presentation settings taken from the resolved configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub indent: usize,
    pub show_product_counts: bool,
}

// ============================================================================
// TREE RENDERING
// ============================================================================

/// Prints tree rows, one per line, with an aligned product-count column.
///
/// With `highlight`, rows whose own fields match the query are emphasized;
/// the remaining rows are ancestors shown for context.
pub fn print_rows<W: WriteColor>(
    out: &mut W,
    rows: &[TreeRow<'_>],
    options: &RenderOptions,
    highlight: Option<&str>,
) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No categories found.");
    }

    let labels: Vec<String> = rows.iter().map(|row| label(row, options.indent)).collect();
    let width = labels.iter().map(|l| l.width()).max().unwrap_or(0);
    let needle = highlight.map(str::to_lowercase);

    for (row, label) in rows.iter().zip(&labels) {
        let category = row.category;
        let mut spec = ColorSpec::new();
        if !category.is_active {
            spec.set_dimmed(true);
        }
        if let Some(needle) = &needle {
            if category.matches_lowercase(needle) {
                spec.set_fg(Some(Color::Green)).set_bold(true);
            }
        }

        out.set_color(&spec)?;
        write!(out, "{label}")?;
        out.reset()?;

        if options.show_product_counts {
            let pad = width - label.width();
            write!(out, "{:pad$}  {}", "", product_label(category.product_count))?;
        }
        if !category.is_active {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, " (inactive)")?;
            out.reset()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn label(row: &TreeRow<'_>, indent: usize) -> String {
    let marker = match (row.has_children, row.expanded) {
        (false, _) => ' ',
        (true, true) => '▾',
        (true, false) => '▸',
    };
    format!(
        "{:width$}{marker} {}",
        "",
        row.category.name,
        width = row.depth * indent
    )
}

fn product_label(count: u64) -> String {
    match count {
        1 => "1 product".to_string(),
        n => format!("{n} products"),
    }
}

// ============================================================================
// REPORTS
// ============================================================================

pub fn print_stats<W: WriteColor>(out: &mut W, stats: &TreeStats) -> io::Result<()> {
    let lines = [
        ("Categories", stats.total.to_string()),
        ("Roots", stats.roots.to_string()),
        ("Active", stats.active.to_string()),
        ("Inactive", stats.inactive.to_string()),
        ("Products", stats.products.to_string()),
        ("Max depth", stats.max_depth.to_string()),
    ];
    for (name, value) in lines {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{name:<11}")?;
        out.reset()?;
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Prints the build report; returns whether it was clean.
pub fn print_report<W: WriteColor>(out: &mut W, report: &BuildReport) -> io::Result<bool> {
    if report.is_clean() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "✓ category hierarchy is consistent")?;
        out.reset()?;
        return Ok(true);
    }

    let sections = [
        ("orphaned (parent not found, shown as root)", &report.orphans),
        ("cycle broken (promoted to root)", &report.cycles_broken),
        ("duplicate id (later records ignored)", &report.duplicates),
        ("nested too deeply (promoted to root)", &report.too_deep),
    ];
    for (title, ids) in sections {
        if ids.is_empty() {
            continue;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(out, "✗ {} {title}", ids.len())?;
        out.reset()?;
        for id in ids {
            writeln!(out, "  • {id}")?;
        }
    }
    Ok(false)
}

/// Prints parent candidates indented by their level.
pub fn print_parents<W: WriteColor>(
    out: &mut W,
    parents: &[&Category],
    indent: usize,
) -> io::Result<()> {
    if parents.is_empty() {
        return writeln!(out, "No eligible parent categories.");
    }
    writeln!(out, "(none: top level)")?;
    for category in parents {
        let pad = category.level as usize * indent;
        writeln!(out, "{:pad$}{}  [{}]", "", category.name, category.id)?;
    }
    Ok(())
}

pub fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
