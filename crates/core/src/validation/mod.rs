use thiserror::Error;

use crate::model::{DimensionEntry, DimensionSchema};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required dimension(s): {}", .keys.join(", "))]
    MissingRequired { keys: Vec<String> },
}

/// Check submitted dimensions against the owning fact type's declared
/// schemas. Only required-key presence is enforced: values are not
/// type-checked at write time, and submitted keys outside the schema are
/// tolerated.
pub fn validate_dimensions(
    submitted: &[DimensionEntry],
    schemas: &[DimensionSchema],
) -> Result<(), ValidationError> {
    let missing: Vec<String> = schemas
        .iter()
        .filter(|schema| schema.is_required)
        .filter(|schema| !submitted.iter().any(|entry| entry.key == schema.key))
        .map(|schema| schema.key.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequired { keys: missing })
    }
}
