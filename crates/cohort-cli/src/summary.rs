use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cohort_cli::types::{ExclusionsResult, SplitResult, TableResult};

pub fn print_exclusions(result: &ExclusionsResult) {
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Participants")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Excluded"),
        count_cell(result.excluded, Color::Yellow),
    ]);
    println!("{table}");
}

pub fn print_table_result(result: &TableResult) {
    println!("Output: {}", result.output.display());
    println!("Columns: {}", result.columns.join(", "));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Participants"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for count in &result.counts {
        table.add_row(vec![
            Cell::new(&result.label),
            Cell::new(&count.column),
            Cell::new(&count.value),
            Cell::new(count.count),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        total_cell(&result.label),
        dim_cell("-"),
        Cell::new(result.rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_splits(result: &SplitResult) {
    let manifest = &result.manifest;
    println!("Seed: {}", manifest.seed);
    println!("Cohort SHA-256: {}", manifest.cohort_sha256);
    println!("Manifest: {}", result.paths.manifest.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Split"),
        header_cell("Fraction"),
        header_cell("Participants"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let test_fraction = 1.0 - manifest.train_fraction - manifest.val_fraction;
    let rows = [
        ("train", manifest.train_fraction, manifest.train, &result.paths.train),
        ("val", manifest.val_fraction, manifest.val, &result.paths.val),
        ("test", test_fraction, manifest.test, &result.paths.test),
    ];
    for (name, fraction, count, path) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{fraction:.3}")),
            Cell::new(count),
            Cell::new(path.display()),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        dim_cell("-"),
        Cell::new(manifest.cohort_size).add_attribute(Attribute::Bold),
        dim_cell(format!("{} excluded", result.excluded)),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
