use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` expected {expected}, found `{value}`")]
    FieldKind {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Returns `true` for failures raised while turning the dataset into charts.
    #[must_use]
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::FieldKind { .. }
                | Self::InvalidViewport { .. }
                | Self::InvalidData(_)
                | Self::Render(_)
        )
    }
}
