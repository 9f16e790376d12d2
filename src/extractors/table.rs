//! Label/value pairs laid out as table rows

use crate::config::FieldSpec;
use crate::document::{select_within, text_of, Document};

use super::Strategy;

pub const TABLE_ROWS: &str = "table_rows";

/// First cell is the label, second cell the value
pub struct TableRowStrategy;

impl Strategy for TableRowStrategy {
    fn name(&self) -> &'static str {
        TABLE_ROWS
    }

    fn find(&self, document: &Document, spec: &FieldSpec) -> Option<String> {
        for row in document.select("tr") {
            let cells = select_within(&row, "td, th");
            if cells.len() < 2 {
                continue;
            }

            let label = text_of(&cells[0]).to_lowercase();
            if !spec.matches(&label) {
                continue;
            }

            // An empty value cell does not end the search
            let value = text_of(&cells[1]);
            if !value.is_empty() {
                return Some(value);
            }
        }

        None
    }
}
