use thiserror::Error;

/// Failures raised while fetching and parsing catalog pages.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid page number {0}: must be between 1 and 50")]
    InvalidPage(u32),

    #[error("invalid page range {start} to {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("failed to fetch page {page}")]
    Fetch {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("page markup is empty")]
    InvalidContent,

    #[error("no product cards found on the page")]
    NoRecordsFound,

    #[error("product card has no title")]
    MissingTitle,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("input batch is empty")]
    EmptyBatch,
}

/// Post-transform gate failures. Each variant is one broken invariant of the
/// final dataset.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("dataset has no rows")]
    Empty,

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("dataset contains duplicate rows")]
    DuplicateRows,

    #[error("dataset still contains 'Unknown Product' rows")]
    UnknownProduct,

    #[error("column '{column}' is not {expected}")]
    WrongType {
        column: String,
        expected: &'static str,
    },
}
