//! Quote-masked CSV output.
//!
//! The output convention quotes every column except the numeric `period`
//! and `euro` ones. The `csv` crate only offers whole-file quote styles,
//! so fields are rendered here, with RFC 4180 quote doubling for embedded
//! quotes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use apc_enrich::{EnrichedOutput, EnrichedRow};

/// Columns written without surrounding quotes.
const UNQUOTED_ROLES: [&str; 2] = ["period", "euro"];

fn render_field(value: &str, quote: bool) -> String {
    if quote {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_line(cells: &[String], mask: &[bool]) -> String {
    let rendered: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| render_field(cell, mask.get(index).copied().unwrap_or(true)))
        .collect();
    rendered.join(",")
}

/// Writes the enriched output: one header line with the role names, then
/// every row in registry column order. Passthrough rows are emitted with
/// their original cells.
pub fn write_output(path: &Path, output: &EnrichedOutput) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create output: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mask: Vec<bool> = output
        .columns
        .iter()
        .map(|role| !UNQUOTED_ROLES.contains(&role.as_str()))
        .collect();

    writeln!(writer, "{}", render_line(&output.columns, &mask))
        .with_context(|| format!("write output: {}", path.display()))?;
    for row in &output.rows {
        let cells: Vec<String> = match row {
            EnrichedRow::Reconciled(row) => output
                .columns
                .iter()
                .map(|role| row.get(role).as_output_str().to_string())
                .collect(),
            EnrichedRow::Passthrough(cells) => cells.clone(),
        };
        writeln!(writer, "{}", render_line(&cells, &mask))
            .with_context(|| format!("write output: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush output: {}", path.display()))?;
    Ok(())
}
