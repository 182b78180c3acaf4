use std::fmt::Write as _;

use crate::core::{Dataset, is_missing};

/// Classes added after `dataframe` on the `<table>` element.
pub const DEFAULT_TABLE_CLASSES: &str = "table table-striped table-dark table-bordered";

/// Shown in place of missing cells.
pub const MISSING_CELL_TEXT: &str = "NaN";

/// Renders the whole dataset as one `<table>`: one header row, then one row
/// per record. Nothing is filtered or truncated.
#[must_use]
pub fn format_table(dataset: &Dataset, classes: &str) -> String {
    let cell_count = dataset.row_count() * dataset.column_count();
    let mut html = String::with_capacity(128 + cell_count * 24);

    let class_attr = if classes.trim().is_empty() {
        "dataframe".to_owned()
    } else {
        format!("dataframe {}", escape_html(classes.trim()))
    };
    // Writing into a String cannot fail.
    let _ = writeln!(html, r#"<table border="1" class="{class_attr}">"#);
    html.push_str("  <thead>\n");
    html.push_str("    <tr style=\"text-align: right;\">\n");
    for name in dataset.header() {
        let _ = writeln!(html, "      <th>{}</th>", escape_html(name));
    }
    html.push_str("    </tr>\n");
    html.push_str("  </thead>\n");
    html.push_str("  <tbody>\n");
    for row in dataset.rows() {
        html.push_str("    <tr>\n");
        for cell in row {
            let text = if is_missing(cell) {
                MISSING_CELL_TEXT.to_owned()
            } else {
                escape_html(cell)
            };
            let _ = writeln!(html, "      <td>{text}</td>");
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n");
    html.push_str("</table>");
    html
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
