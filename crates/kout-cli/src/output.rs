//! Result rendering for the CLI.

use crate::Format;
use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use kout_core::graph::{Direction, MemoryGraph};
use kout_core::traversal::{CompletionStatus, TraversalOutput, TraversalResult};
use std::path::Path;

/// Prints a traversal result to stdout.
///
/// Text output is the bare count, or one id per line; a truncation notice
/// goes to stderr.
pub fn print_result(result: &TraversalResult, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(result)?),
        Format::Text => {
            match &result.output {
                TraversalOutput::Count(n) => println!("{n}"),
                TraversalOutput::Ids(ids) => {
                    for id in ids {
                        println!("{id}");
                    }
                }
            }
            if result.status == CompletionStatus::LimitReached {
                eprintln!("note: result limit reached, output truncated");
            }
        }
    }
    Ok(())
}

/// Prints graph statistics to stdout.
pub fn print_info(path: &Path, graph: &MemoryGraph) {
    println!("{} {}", "Graph:".bold(), path.display());

    let max_degree = |direction| {
        graph
            .vertex_ids()
            .map(|v| graph.degree(v, direction))
            .max()
            .unwrap_or(0)
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    table.add_row(vec![Cell::new("Vertices"), Cell::new(graph.vertex_count())]);
    table.add_row(vec![Cell::new("Edges"), Cell::new(graph.edge_count())]);
    table.add_row(vec![Cell::new("Labels"), Cell::new(graph.labels().len())]);
    table.add_row(vec![
        Cell::new("Max out-degree"),
        Cell::new(max_degree(Direction::Out)),
    ]);
    table.add_row(vec![
        Cell::new("Max in-degree"),
        Cell::new(max_degree(Direction::In)),
    ]);
    println!("{table}");

    println!("\n{}", "Labels".bold().underline());
    for (_, name) in graph.labels().iter() {
        println!("  - {}", name.cyan());
    }
}
