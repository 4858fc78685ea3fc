//! Bracket-notation filter handling
//!
//! Turns decoded `filter[...]`/`dim[...]` query pairs into typed condition
//! lists consumed by the type resolver and the query compiler.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{ColumnFilter, Comparator, DimensionFilter, FilterSet};
pub use error::FilterError;
pub use parser::parse_filter_pairs;
