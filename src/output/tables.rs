use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::variables::VariableMap;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn variables_table(variables: &VariableMap) -> Table {
    let mut table = create_table();
    table.set_header(vec![Cell::new("Key"), Cell::new("Value")]);
    for (key, value) in variables {
        table.add_row(vec![
            Cell::new(key).set_alignment(CellAlignment::Left),
            Cell::new(value).set_alignment(CellAlignment::Left),
        ]);
    }
    table
}
