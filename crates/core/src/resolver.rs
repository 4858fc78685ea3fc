//! Dimension type resolution
//!
//! A dimension key is not globally typed: each fact type declares its own
//! schema, and the same key may legitimately be a number in one type and a
//! string in another. Resolution therefore collects the distinct set of
//! declared types across every fact type, and the compiler emits one
//! comparison branch per member.

use std::collections::BTreeSet;

use crate::filter::{DimensionFilter, FilterError};
use crate::model::{DimensionType, FactType};

/// A dimension filter together with the declared types its key resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedDimensionFilter {
    pub filter: DimensionFilter,
    pub types: BTreeSet<DimensionType>,
}

/// Collect the distinct declared types for one dimension key across all
/// fact types. A key no schema declares is a client error.
pub fn resolve_dimension_types(
    key: &str,
    fact_types: &[FactType],
) -> Result<BTreeSet<DimensionType>, FilterError> {
    let mut types = BTreeSet::new();
    for fact_type in fact_types {
        if let Some(schema) = fact_type.schema(key) {
            types.insert(schema.data_type);
        }
    }

    if types.is_empty() {
        return Err(FilterError::UnknownDimensionKey {
            key: key.to_string(),
        });
    }

    Ok(types)
}

/// Resolve every dimension filter in order, failing on the first unknown
/// key before any SQL is built.
pub fn resolve_filters(
    filters: &[DimensionFilter],
    fact_types: &[FactType],
) -> Result<Vec<TypedDimensionFilter>, FilterError> {
    filters
        .iter()
        .map(|filter| {
            resolve_dimension_types(&filter.key, fact_types).map(|types| TypedDimensionFilter {
                filter: filter.clone(),
                types,
            })
        })
        .collect()
}
