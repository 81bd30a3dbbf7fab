//! Table output for rule listings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::{ImportSummary, RuleSummary};

/// Build the `list` table.
pub fn rules_table(rules: &[RuleSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Selectors"),
        header_cell("State"),
        header_cell("Max width"),
        header_cell("Properties"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    for rule in rules {
        let selectors = if rule.selectors.is_empty() {
            dim_cell("(any)")
        } else {
            Cell::new(&rule.selectors)
        };
        table.add_row(vec![
            selectors,
            optional_cell(&rule.state),
            optional_cell(&rule.max_width),
            Cell::new(rule.properties),
        ]);
    }
    table
}

pub fn print_rules(rules: &[RuleSummary]) {
    if rules.is_empty() {
        println!("No rules stored.");
        return;
    }
    println!("{}", rules_table(rules));
    println!("{} rule(s)", rules.len());
}

pub fn print_rule(rule: &RuleSummary) {
    println!("{}", rules_table(std::slice::from_ref(rule)));
}

pub fn print_import(summary: &ImportSummary) {
    println!(
        "Imported {} rule(s); {} rule(s) stored.",
        summary.imported, summary.total
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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

fn optional_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
