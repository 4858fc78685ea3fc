pub mod catalog;
pub mod fact;
pub mod fact_type;

pub use catalog::{CatalogError, SchemaCatalog};
pub use fact::{DimensionEntry, Fact, FactPatch, NewFact};
pub use fact_type::{DimensionSchema, DimensionType, FactType};
