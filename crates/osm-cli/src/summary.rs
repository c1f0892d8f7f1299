use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use osm_cli::census::{Contributors, StreetReport};
use osm_transform::{KeyTally, NormalizationMapping, TagCategory};

use crate::types::ProcessResult;

const SINK_LABELS: [&str; 5] = ["nodes", "node_tags", "ways", "way_nodes", "way_tags"];

pub fn print_process_summary(result: &ProcessResult) {
    println!("Source: {}", result.source.display());
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let rows = [
        result.rows.nodes,
        result.rows.node_tags,
        result.rows.ways,
        result.rows.way_nodes,
        result.rows.way_tags,
    ];
    for ((label, path), count) in SINK_LABELS.iter().zip(&result.files).zip(rows) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(path.display()),
            count_cell(count),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.rows.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let stats = &result.stats;
    println!(
        "Elements: {} nodes, {} ways, {} skipped; {} problem tags dropped{}",
        stats.nodes,
        stats.ways,
        stats.skipped,
        stats.dropped_tags,
        if result.validated { "; schema OK" } else { "" }
    );
    print_tally(&result.tally);
    let changes = result
        .postcode_changes
        .iter()
        .map(|(from, to)| (from.as_str(), to.as_str()));
    print_pairs("Postcode changes", "Original", "Cleaned", changes);
    print_mapping(&result.mapping);
}

pub fn print_street_report(report: &StreetReport) {
    println!(
        "Street names audited: {} ({} unexpected types)",
        report.streets_seen,
        report.unexpected.len()
    );
    if !report.unexpected.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Type"), header_cell("Street names")]);
        apply_table_style(&mut table);
        for (token, names) in &report.unexpected {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            table.add_row(vec![
                Cell::new(token).add_attribute(Attribute::Bold),
                Cell::new(names.join("\n")),
            ]);
        }
        println!("{table}");
    }
    print_mapping(&report.mapping);
}

pub fn print_tally(tally: &KeyTally) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key category"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in TagCategory::ALL {
        table.add_row(vec![Cell::new(category), count_cell(tally.get(category))]);
    }
    table.add_row(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        Cell::new(tally.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_contributors(contributors: &Contributors, list: bool) {
    println!("Unique contributors: {}", contributors.len());
    if contributors.anonymous > 0 {
        println!("Elements without uid: {}", contributors.anonymous);
    }
    if list && !contributors.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("uid"), header_cell("User")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for (uid, user) in &contributors.users {
            table.add_row(vec![Cell::new(uid), Cell::new(user)]);
        }
        println!("{table}");
    }
}

fn print_mapping(mapping: &NormalizationMapping) {
    print_pairs("Normalization mapping", "Abbreviation", "Canonical", mapping.iter());
}

fn print_pairs<'a, I>(title: &str, left: &str, right: &str, pairs: I)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut table = Table::new();
    table.set_header(vec![header_cell(left), header_cell(right)]);
    apply_table_style(&mut table);
    let mut count = 0usize;
    for (from, to) in pairs {
        table.add_row(vec![Cell::new(from), Cell::new(to)]);
        count += 1;
    }
    if count == 0 {
        println!("{title}: none");
        return;
    }
    println!("{title}:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
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

fn count_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
