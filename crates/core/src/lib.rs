pub mod coerce;
pub mod error;
pub mod filter;
pub mod materialize;
pub mod model;
pub mod resolver;
pub mod sql;
pub mod store;
pub mod validation;

pub use coerce::DimensionValue;
pub use error::{EngineError, Result};
pub use filter::{parse_filter_pairs, Comparator, FilterError, FilterSet};
pub use materialize::{materialize, DimensionRow, FactRecord};
pub use model::catalog::{CatalogError, SchemaCatalog};
pub use model::{DimensionEntry, DimensionSchema, DimensionType, Fact, FactPatch, FactType, NewFact};
pub use resolver::{resolve_dimension_types, resolve_filters, TypedDimensionFilter};
pub use sql::{compile_query, plan_query, CompiledQuery};
pub use store::{FactStore, StoreError};
pub use validation::{validate_dimensions, ValidationError};
