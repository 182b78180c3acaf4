//! HTML output: the data table fragment and the full page template.

mod page;
mod table;

pub use page::{PageOptions, compose_page};
pub use table::{DEFAULT_TABLE_CLASSES, MISSING_CELL_TEXT, format_table};
