use catalog_report::ReportError;
use catalog_report::core::{Dataset, MISSING_TOKENS, is_missing};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/titles_sample.csv");

fn fixture() -> Dataset {
    Dataset::load(FIXTURE).expect("fixture should load")
}

#[test]
fn loads_header_and_every_row() {
    let dataset = fixture();

    assert_eq!(dataset.column_count(), 12);
    assert_eq!(dataset.row_count(), 16);
    assert_eq!(dataset.header()[0], "show_id");
    assert_eq!(dataset.header()[7], "release_year");
    assert!(!dataset.is_empty());
}

#[test]
fn quoted_cells_keep_commas_and_quotes() {
    let dataset = fixture();
    let country = dataset.column_index("country").expect("country column");
    let description = dataset.column_index("description").expect("description column");

    assert_eq!(dataset.rows()[9].get(country), Some("United States, India"));
    assert_eq!(
        dataset.rows()[11].get(description),
        Some(r#"It's time for some <holiday> baking & "festive" cheer."#)
    );
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = Dataset::load("tests/fixtures/does_not_exist.csv").expect_err("load must fail");

    match err {
        ReportError::FileNotFound { path } => assert!(path.ends_with("does_not_exist.csv")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn categorical_column_skips_missing_cells() {
    let dataset = fixture();
    let countries = dataset.categorical("country").expect("country values");

    assert_eq!(countries.len(), 15);
    assert_eq!(countries[0], "United States");
    assert!(!countries.contains(&""));
}

#[test]
fn numeric_column_parses_every_present_cell() {
    let dataset = fixture();
    let years = dataset.numeric("release_year").expect("years");

    assert_eq!(years.len(), 16);
    assert_eq!(years[0], 2020.0);
    assert_eq!(years.iter().copied().fold(f64::INFINITY, f64::min), 1998.0);
}

#[test]
fn numeric_column_rejects_text_cells() {
    let dataset = fixture();
    let err = dataset.numeric("duration").expect_err("duration is text");

    match err {
        ReportError::FieldKind { field, value, .. } => {
            assert_eq!(field, "duration");
            assert_eq!(value, "90 min");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_column_is_missing_field() {
    let dataset = fixture();
    let err = dataset.categorical("genre").expect_err("no such column");

    assert!(matches!(err, ReportError::MissingField { ref field } if field == "genre"));
    assert!(err.is_render_error());
}

#[test]
fn short_rows_are_padded_with_missing_cells() {
    let dataset = Dataset::from_reader("type,country,release_year\nMovie,Spain\nTV Show\n".as_bytes())
        .expect("short rows");

    assert_eq!(dataset.row_count(), 2);
    assert!(dataset.rows().iter().all(|row| row.len() == 3));
    assert_eq!(dataset.categorical("type").expect("type"), vec!["Movie", "TV Show"]);
    assert_eq!(dataset.categorical("country").expect("country"), vec!["Spain"]);
    assert!(dataset.numeric("release_year").expect("years").is_empty());
}

#[test]
fn long_rows_fail_to_parse() {
    let err = Dataset::from_reader("a,b\n1,2\n3,4,5\n".as_bytes()).expect_err("long row");
    assert!(matches!(err, ReportError::Parse(_)));

    let row = csv::StringRecord::from(vec!["1", "2", "3"]);
    let err = Dataset::new(vec!["a".to_owned(), "b".to_owned()], vec![row]).expect_err("long row");
    assert!(matches!(err, ReportError::Parse(_)));
}

#[test]
fn empty_input_has_no_header() {
    let err = Dataset::from_reader("".as_bytes()).expect_err("empty input");
    assert!(matches!(err, ReportError::Parse(_)));
}

#[test]
fn header_only_input_is_an_empty_dataset() {
    let dataset = Dataset::from_reader("type,country,release_year\n".as_bytes())
        .expect("header-only input");

    assert!(dataset.is_empty());
    assert_eq!(dataset.column_count(), 3);
    assert!(dataset.categorical("type").expect("type").is_empty());
    assert!(dataset.numeric("release_year").expect("years").is_empty());
}

#[test]
fn common_missing_tokens_are_skipped_in_numeric_columns() {
    let dataset =
        Dataset::from_reader("year\nNaN\n2001\nNA\nnull\n1999\n".as_bytes()).expect("dataset");

    assert_eq!(dataset.row_count(), 5);
    assert_eq!(dataset.numeric("year").expect("years"), vec![2001.0, 1999.0]);
}

#[test]
fn missing_token_table_matches_predicate() {
    for token in MISSING_TOKENS {
        assert!(is_missing(token), "{token:?} should be missing");
    }
    assert!(!is_missing("Movie"));
    assert!(!is_missing("0"));
    assert!(!is_missing(" "));
}
