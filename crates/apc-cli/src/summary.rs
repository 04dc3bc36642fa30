//! Terminal summaries: classification table, diagnostics, run result.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use apc_map::ClassificationReport;
use apc_model::{ColumnRegistry, Requirement};

use crate::types::EnrichResult;

pub fn print_classification(
    registry: &ColumnRegistry,
    header: Option<&[String]>,
    report: &ClassificationReport,
    expected_columns: usize,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Index"),
        header_cell("Header"),
        header_cell("Requirement"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for index in 0..expected_columns {
        let header_name = header
            .and_then(|row| row.get(index))
            .map(String::as_str)
            .unwrap_or("");
        match registry.role_at(index) {
            Some(role) => {
                let column = registry.column(role).expect("role comes from the registry");
                table.add_row(vec![
                    Cell::new(index),
                    Cell::new(header_name),
                    requirement_cell(column.requirement),
                    role_cell(role, column.requirement),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(index),
                    Cell::new(header_name),
                    Cell::new("-").fg(Color::DarkGrey),
                    Cell::new("(unclaimed)").fg(Color::DarkGrey),
                ]);
            }
        }
    }
    println!("{table}");

    let unassigned: Vec<_> = registry
        .iter()
        .filter(|column| column.index.is_none() && column.requirement != Requirement::None)
        .collect();
    for column in unassigned {
        println!(
            "The {} column '{}' could not be identified.",
            column.requirement, column.role
        );
    }
    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic.message());
    }
}

pub fn print_result(result: &EnrichResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    println!(
        "Rows: {} total, {} enriched, {} passed through unchanged",
        result.total_rows, result.reconciled, result.passthrough
    );
    if result.diagnostics.is_empty() {
        println!("Metadata enrichment successful, no errors occurred");
    } else {
        eprintln!("There were errors during the enrichment process:");
        for diagnostic in &result.diagnostics {
            eprintln!("- Line {}: {}", diagnostic.line, diagnostic.message);
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn requirement_cell(requirement: Requirement) -> Cell {
    match requirement {
        Requirement::Mandatory => Cell::new("mandatory").fg(Color::Green),
        Requirement::Optional => Cell::new("optional").fg(Color::Green),
        Requirement::None => Cell::new("non-required").fg(Color::Blue),
    }
}

fn role_cell(role: &str, requirement: Requirement) -> Cell {
    match requirement {
        Requirement::Mandatory => Cell::new(role)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Requirement::Optional => Cell::new(role).fg(Color::Green),
        Requirement::None => Cell::new(role).fg(Color::Blue),
    }
}
