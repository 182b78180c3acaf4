use catalog_report::core::Dataset;
use catalog_report::report::{DEFAULT_TABLE_CLASSES, MISSING_CELL_TEXT, format_table};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/titles_sample.csv");

fn fixture_table() -> String {
    let dataset = Dataset::load(FIXTURE).expect("fixture");
    format_table(&dataset, DEFAULT_TABLE_CLASSES)
}

#[test]
fn one_row_per_record_plus_header() {
    let html = fixture_table();

    assert_eq!(html.matches("<tr").count(), 17);
    assert_eq!(html.matches("<th>").count(), 12);
    assert_eq!(html.matches("<td>").count(), 16 * 12);
    assert!(html.starts_with("<table"));
    assert!(html.ends_with("</table>"));
}

#[test]
fn table_carries_dataframe_classes() {
    let html = fixture_table();

    assert!(html.starts_with(
        r#"<table border="1" class="dataframe table table-striped table-dark table-bordered">"#
    ));
    assert!(html.contains(r#"<tr style="text-align: right;">"#));
    assert!(html.contains("<th>release_year</th>"));
}

#[test]
fn cells_are_html_escaped() {
    let html = fixture_table();

    assert!(html.contains("<td>Blood &amp; Water</td>"));
    assert!(html.contains("&lt;holiday&gt; baking &amp; &quot;festive&quot; cheer."));
    assert!(!html.contains("<holiday>"));
}

#[test]
fn missing_cells_render_as_nan() {
    let html = fixture_table();

    assert_eq!(MISSING_CELL_TEXT, "NaN");
    assert!(html.contains("<td>NaN</td>"));
    assert!(html.contains("<td>United States, India</td>"));
}

#[test]
fn rows_keep_source_order() {
    let html = fixture_table();

    let first = html.find("<td>s1</td>").expect("first row");
    let second = html.find("<td>s2</td>").expect("second row");
    let last = html.find("<td>s16</td>").expect("last row");
    assert!(first < second && second < last);
}

#[test]
fn blank_classes_leave_only_dataframe() {
    let dataset = Dataset::from_reader("a,b\n1,2\n".as_bytes()).expect("dataset");
    let html = format_table(&dataset, "   ");

    assert!(html.starts_with(r#"<table border="1" class="dataframe">"#));
}

#[test]
fn header_only_dataset_renders_empty_body() {
    let dataset = Dataset::from_reader("type,country\n".as_bytes()).expect("dataset");
    let html = format_table(&dataset, DEFAULT_TABLE_CLASSES);

    assert_eq!(html.matches("<tr").count(), 1);
    assert_eq!(html.matches("<td>").count(), 0);
    assert!(html.contains("<tbody>\n  </tbody>"));
}

#[test]
fn padded_short_rows_show_nan_cells() {
    let dataset = Dataset::from_reader("type,country,release_year\nMovie,Spain\n".as_bytes())
        .expect("short row");
    let html = format_table(&dataset, "");

    assert_eq!(html.matches("<td>").count(), 3);
    assert_eq!(html.matches("<td>NaN</td>").count(), 1);
    assert!(html.find("<td>Spain</td>") < html.find("<td>NaN</td>"));
}
