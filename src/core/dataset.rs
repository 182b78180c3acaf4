use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::error::{ReportError, ReportResult};

/// Cell spellings treated as missing values, matching common CSV exporters.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` when a raw cell holds no value.
#[must_use]
pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// Immutable in-memory snapshot of the input table.
///
/// Every row has exactly one cell per header column; rows read with fewer
/// cells are padded with missing values. The dataset is loaded
/// once and then shared read-only, so it carries no interior mutability.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Dataset {
    pub fn new(header: Vec<String>, rows: Vec<StringRecord>) -> ReportResult<Self> {
        if header.is_empty() {
            return Err(ReportError::Parse("missing header row".to_owned()));
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(ReportError::Parse(format!(
                    "row {} has {} fields, header has {}",
                    index + 1,
                    row.len(),
                    header.len()
                )));
            }
        }

        Ok(Self { header, rows })
    }

    /// Loads a comma-delimited file whose first record is the header.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::Io(err),
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> ReportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = reader
            .headers()
            .map_err(map_csv_error)?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if header.is_empty() || header.iter().all(String::is_empty) {
            return Err(ReportError::Parse("missing header row".to_owned()));
        }

        let mut rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_csv_error)?;
        // Short rows are padded with missing cells; long rows fail in `new`.
        for row in &mut rows {
            while row.len() < header.len() {
                row.push_field("");
            }
        }

        Self::new(header, rows)
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, field: &str) -> ReportResult<usize> {
        self.header
            .iter()
            .position(|name| name == field)
            .ok_or_else(|| ReportError::MissingField {
                field: field.to_owned(),
            })
    }

    /// Non-missing values of a column, in row order.
    pub fn categorical(&self, field: &str) -> ReportResult<Vec<&str>> {
        let index = self.column_index(field)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter(|cell| !is_missing(cell))
            .collect())
    }

    /// Non-missing values of a column parsed as finite numbers.
    pub fn numeric(&self, field: &str) -> ReportResult<Vec<f64>> {
        let index = self.column_index(field)?;
        let mut values = Vec::with_capacity(self.rows.len());
        for cell in self.rows.iter().filter_map(|row| row.get(index)) {
            if is_missing(cell) {
                continue;
            }
            match cell.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => {
                    return Err(ReportError::FieldKind {
                        field: field.to_owned(),
                        expected: "a finite number",
                        value: cell.to_owned(),
                    });
                }
            }
        }
        Ok(values)
    }
}

fn map_csv_error(err: csv::Error) -> ReportError {
    let position = err
        .position()
        .map(|pos| format!(" at line {}", pos.line()))
        .unwrap_or_default();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => ReportError::Io(io_err),
        kind => ReportError::Parse(format!("{}{position}", describe_csv_error(&kind))),
    }
}

fn describe_csv_error(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("record has {len} fields, expected {expected_len}"),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid utf-8: {err}"),
        other => format!("{other:?}"),
    }
}
