use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Upload parsing failed. Fatal to that upload; the user must re-upload a
/// corrected file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Zero-byte upload body.
    #[error("empty upload body")]
    EmptyInput,

    /// The byte stream is not valid UTF-8 text.
    #[error("upload is not decodable as UTF-8 text")]
    Encoding,

    /// Header row absent, or every header field blank.
    #[error("missing or empty header row")]
    EmptyHeader,

    /// The same column name appears twice in the header.
    #[error("duplicate column name '{0}' in header")]
    DuplicateColumn(String),

    /// A record's field count differs from the header's.
    #[error("row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: u64,
        expected: u64,
        found: u64,
    },

    /// Any other CSV-level failure.
    #[error("malformed CSV: {0}")]
    Csv(csv::Error),
}

/// Invalid column selection for charting. Recoverable; the user re-selects.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A selected column does not exist in the view.
    #[error("invalid selection: no column named '{0}'")]
    InvalidSelection(String),

    /// The y-axis column is text-typed.
    #[error("non-numeric y-axis: column '{0}' does not contain numeric values")]
    NonNumericY(String),
}

/// Re-serializing a table to CSV bytes failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV record: {0}")]
    Write(#[from] csv::Error),

    #[error("finalizing CSV output: {0}")]
    Finish(String),
}
