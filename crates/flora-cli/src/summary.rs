//! Terminal tables for run summaries, decoded distributions, and catalogs.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use flora_fetch::RunSummary;
use flora_model::{Occurrence, OccurrenceStatus, RegionCatalog};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Counts of one fetch run.
pub fn run_summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows written"), header_cell("Skipped"), header_cell("Failed")]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.written).add_attribute(Attribute::Bold),
        count_cell(summary.skipped, Color::Yellow),
        count_cell(summary.failed, Color::Red),
    ]);
    table
}

pub fn print_run_summary(title: &str, output: &Path, summary: &RunSummary) {
    println!("{title}");
    println!("Output: {}", output.display());
    println!("{}", run_summary_table(summary));
}

/// One row per catalog region, in catalog order.
///
/// With `present_only`, regions where the taxon is missing are left out.
pub fn occurrence_table(catalog: &RegionCatalog, occurrence: &Occurrence, present_only: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Region"), header_cell("Status")]);
    apply_table_style(&mut table);
    for region in catalog.regions() {
        let status = occurrence.get(&region.code).unwrap_or_default();
        if present_only && status == OccurrenceStatus::Missing {
            continue;
        }
        table.add_row(vec![
            Cell::new(&region.code),
            Cell::new(&region.name),
            status_cell(status),
        ]);
    }
    table
}

pub fn regions_table(catalog: &RegionCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Region")]);
    apply_table_style(&mut table);
    for region in catalog.regions() {
        table.add_row(vec![Cell::new(&region.code), Cell::new(&region.name)]);
    }
    table
}

fn status_cell(status: OccurrenceStatus) -> Cell {
    let cell = Cell::new(status);
    match status {
        OccurrenceStatus::Missing => cell.fg(Color::DarkGrey),
        OccurrenceStatus::Endemic => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        OccurrenceStatus::Native => cell.fg(Color::Green),
        OccurrenceStatus::PresumablyExtinct | OccurrenceStatus::ReportedInError => {
            cell.fg(Color::Red)
        }
        OccurrenceStatus::DoubtfullyPresent
        | OccurrenceStatus::DoubtfullyNative
        | OccurrenceStatus::Undefined => cell.fg(Color::Yellow),
        OccurrenceStatus::Introduced
        | OccurrenceStatus::Cultivated
        | OccurrenceStatus::Naturalized
        | OccurrenceStatus::CasualAlien => cell.fg(Color::Blue),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
