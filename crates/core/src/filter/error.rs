//! Error types for filter parsing, type resolution, and compilation

use thiserror::Error;

/// Errors raised while turning query-string filters into SQL. All of them
/// are client errors detected before any statement reaches the database.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unimplemented comparison operator '{token}'")]
    UnsupportedComparator { token: String },

    #[error("unknown dimension key '{key}'")]
    UnknownDimensionKey { key: String },

    #[error("unknown filter column '{column}'")]
    UnknownColumn { column: String },

    #[error("fact column '{column}' only supports equality filters, got '{token}'")]
    ColumnComparatorUnsupported { column: String, token: String },

    #[error("malformed filter key '{raw}'")]
    MalformedKey { raw: String },
}
