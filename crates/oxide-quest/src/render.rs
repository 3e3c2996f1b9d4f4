//! Plain-text tables for terminal output.

use std::fmt::Write;

use crate::dataset::Table;
use crate::value::Row;

/// Shown in place of an empty result.
pub const NO_RESULTS: &str = "No results found";

/// Renders rows as a boxed text table. Columns come from the first row.
#[must_use]
pub fn render_rows(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return NO_RESULTS.to_string();
    };

    let headers: Vec<&str> = first.columns().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let rule = format!("+{rule}+\n");

    let mut out = String::new();
    out.push_str(&rule);
    push_line(&mut out, headers.iter().copied(), &widths);
    out.push_str(&rule);
    for line in &cells {
        push_line(&mut out, line.iter().map(String::as_str), &widths);
    }
    out.push_str(&rule);
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.zip(widths) {
        let _ = write!(out, " {cell:<width$} |");
    }
    out.push('\n');
}

/// Renders a table under an upper-cased title, showing at most `limit` rows.
#[must_use]
pub fn render_table(table: &Table, limit: Option<usize>) -> String {
    let rows = table.rows();
    let shown = limit.map_or(rows, |n| &rows[..n.min(rows.len())]);
    format!("{}\n{}", table.name().to_uppercase(), render_rows(shown))
}
