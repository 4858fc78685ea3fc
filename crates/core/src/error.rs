use thiserror::Error;
use uuid::Uuid;

use crate::filter::FilterError;
use crate::model::catalog::CatalogError;
use crate::store::StoreError;
use crate::validation::ValidationError;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine-level error taxonomy. Every failure is terminal for its request
/// and maps to one structured wire response.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(#[from] FilterError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("fact '{id}' not found")]
    FactNotFound { id: Uuid },

    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "E_VALIDATION_ERROR",
            EngineError::BadRequest(_) => "E_BAD_REQUEST",
            EngineError::Catalog(CatalogError::FactTypeNotFound { .. }) => "E_NOT_FOUND",
            EngineError::Catalog(CatalogError::OperationFailed { .. }) => "E_INTERNAL",
            EngineError::FactNotFound { .. } => "E_NOT_FOUND",
            EngineError::Storage(_) => "E_INTERNAL",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "Dimension validation failed",
            EngineError::BadRequest(_) => "Bad request",
            EngineError::Catalog(CatalogError::FactTypeNotFound { .. })
            | EngineError::FactNotFound { .. } => "Not found",
            EngineError::Catalog(CatalogError::OperationFailed { .. })
            | EngineError::Storage(_) => "Internal error",
        }
    }

    /// HTTP status the error surfaces as.
    pub fn status(&self) -> u16 {
        match self {
            EngineError::Validation(_) | EngineError::BadRequest(_) => 400,
            EngineError::Catalog(CatalogError::FactTypeNotFound { .. })
            | EngineError::FactNotFound { .. } => 404,
            EngineError::Catalog(CatalogError::OperationFailed { .. })
            | EngineError::Storage(_) => 500,
        }
    }
}
