//! Query compilation pipeline
//!
//! `plan_query` is the read path up to (but not including) execution:
//! parse the bracket pairs, resolve dimension types against the catalog,
//! and compile the statement. Every client error is raised here, so a
//! malformed filter never reaches the database.

pub mod compiler;
pub mod params;

pub use compiler::{compile_query, FACT_COLUMNS};
pub use params::{CompiledQuery, ParamSink, ParamValue};

use crate::error::EngineError;
use crate::filter::parse_filter_pairs;
use crate::model::catalog::SchemaCatalog;
use crate::resolver::resolve_filters;

pub fn plan_query(
    catalog: &dyn SchemaCatalog,
    pairs: &[(String, String)],
) -> Result<CompiledQuery, EngineError> {
    let filters = parse_filter_pairs(pairs)?;
    let fact_types = catalog.all_fact_types()?;
    let typed = resolve_filters(&filters.dimensions, &fact_types)?;
    compile_query(&filters.columns, &typed).map_err(Into::into)
}
