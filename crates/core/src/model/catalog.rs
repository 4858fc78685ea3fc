use thiserror::Error;

use crate::model::FactType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("fact type '{key}' not found")]
    FactTypeNotFound { key: String },
    #[error("catalog operation failed: {message}")]
    OperationFailed { message: String },
}

/// Read access to the fact type catalog. Each query resolves dimension
/// types against a fresh read; nothing is cached across requests.
pub trait SchemaCatalog {
    fn fact_type(&self, key: &str) -> Result<FactType, CatalogError>;
    fn all_fact_types(&self) -> Result<Vec<FactType>, CatalogError>;
}
