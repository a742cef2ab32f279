//! Plain-text rendering of a weekly grid.

use std::collections::HashMap;

use clash_engine::{GridCell, ScheduleItem, WeeklyGrid};

const CELL_WIDTH: usize = 16;

/// Render `grid` as a fixed-width table, one row per bucket.
///
/// Cells show item codes joined by `/`. A leading `!` marks a certain clash
/// (two items cover the whole bucket), `?` a bucket shared only partially.
pub fn render_grid(grid: &WeeklyGrid, items: &[ScheduleItem]) -> String {
    let codes: HashMap<&str, &str> = items
        .iter()
        .map(|item| (item.id.as_str(), item.code.as_str()))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{:<11}", "Time"));
    for column in &grid.columns {
        out.push_str(&format!("| {:<width$}", column.day.short_name(), width = CELL_WIDTH));
    }
    out.push('\n');

    let rows = grid.columns.first().map_or(0, |c| c.cells.len());
    for row in 0..rows {
        let Some(first) = grid.columns.first().and_then(|c| c.cells.get(row)) else {
            break;
        };
        out.push_str(&format!("{}-{:<5}", first.start, first.end));
        for column in &grid.columns {
            let label = column
                .cells
                .get(row)
                .map(|cell| cell_label(cell, &codes))
                .unwrap_or_default();
            out.push_str(&format!("| {:<width$}", label, width = CELL_WIDTH));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    out
}

fn cell_label(cell: &GridCell, codes: &HashMap<&str, &str>) -> String {
    let names: Vec<&str> = cell
        .item_ids()
        .map(|id| codes.get(id.as_str()).copied().unwrap_or(id.as_str()))
        .collect();
    let marker = if cell.is_clash() {
        "!"
    } else if cell.is_contested() {
        "?"
    } else {
        ""
    };
    let mut label = format!("{}{}", marker, names.join("/"));
    if label.chars().count() > CELL_WIDTH {
        label = label.chars().take(CELL_WIDTH - 1).collect();
        label.push('~');
    }
    label
}
