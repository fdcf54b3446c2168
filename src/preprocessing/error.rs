//! Error types for the binary encoding filter.

use crate::dataset::DatasetError;

/// Error type for filter operations.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The input header does not designate a class attribute.
    #[error("no class has been assigned to the input format")]
    NoClassAttribute,

    /// A record or batch boundary arrived before any input format was set.
    #[error("no input format defined")]
    NotConfigured,

    /// The output header is not known until the buffered batch is finished.
    #[error("output format is not available before the first batch is finished")]
    OutputFormatPending,

    /// Category ranking requires a numeric class attribute.
    #[error("class attribute `{0}` is not numeric")]
    TargetNotContinuous(String),

    /// The installed ranking does not place a category that occurs in the data.
    #[error("ranking of column {column} does not cover category code {code}")]
    SchemaRankingMismatch { column: usize, code: usize },

    /// A nominal value is not an integer code within the attribute's labels.
    #[error("value {value} in column {column} is not a valid category code")]
    InvalidCategory { column: usize, value: f64 },

    /// Header or record shape violation.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    /// Whether the error reports a protocol misuse rather than bad data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FilterError::NoClassAttribute
                | FilterError::NotConfigured
                | FilterError::TargetNotContinuous(_)
        )
    }
}

impl From<bincode::Error> for FilterError {
    fn from(err: bincode::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}
