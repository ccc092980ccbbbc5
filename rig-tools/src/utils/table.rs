//! Table formatting utilities

use prettytable::{Cell, Row, Table};

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

pub fn add_table_row(table: &mut Table, cells: Vec<String>) {
    let row_cells: Vec<Cell> = cells.into_iter().map(|s| Cell::new(&s)).collect();
    table.add_row(Row::new(row_cells));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows() {
        let mut table = create_table(&["Index", "Name"]);
        add_table_row(&mut table, vec!["0".to_string(), "hips".to_string()]);
        add_table_row(&mut table, vec!["1".to_string(), "spine".to_string()]);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("hips"));
        assert!(rendered.contains("spine"));
    }
}
