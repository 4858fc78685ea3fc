//! Filter-to-SQL compilation
//!
//! Compiles a parsed filter set into one parameterized statement over the
//! facts table and its JSON dimensions column. The base query unnests each
//! fact's dimension array; the inner-join shape means a fact with no
//! dimensions yields no rows. Plain column filters compile to equality
//! against an allowlisted column set. Each dimension filter compiles to an
//! `EXISTS` subquery with one guarded comparison branch per resolved type,
//! branches joined with OR, filters joined with AND. Every user-supplied
//! value and every guard pattern is bound as a named parameter.

use crate::coerce::{DimensionValue, BOOLEAN_PATTERN, DATE_PATTERN, NUMBER_PATTERN};
use crate::filter::{ColumnFilter, Comparator, FilterError};
use crate::model::DimensionType;
use crate::resolver::TypedDimensionFilter;
use crate::sql::params::{CompiledQuery, ParamSink, ParamValue};

/// Fact columns a plain filter may target.
pub const FACT_COLUMNS: [&str; 6] = [
    "id",
    "type_key",
    "observed_at",
    "person_id",
    "resource_id",
    "event_id",
];

const BASE_SELECT: &str = "\
SELECT f.id AS fact_id,
       f.type_key AS type_key,
       f.observed_at AS observed_at,
       json_extract(d.value, '$.key') AS dim_key,
       json_extract(d.value, '$.value') AS dim_value
FROM facts AS f, json_each(f.dimensions) AS d";

const DIM_VALUE: &str = "json_extract(e.value, '$.value')";

/// A branch whose comparison cannot hold for any row. Emitted when the
/// filter value itself fails the branch type's guard, so the statement
/// stays well-formed without ever casting bad input.
const NO_MATCH: &str = "(0 = 1)";

pub fn compile_query(
    columns: &[ColumnFilter],
    dimensions: &[TypedDimensionFilter],
) -> Result<CompiledQuery, FilterError> {
    let mut sink = ParamSink::new();
    let mut conditions = Vec::new();

    for filter in columns {
        conditions.push(compile_column_filter(filter, &mut sink)?);
    }
    for filter in dimensions {
        conditions.push(compile_dimension_filter(filter, &mut sink));
    }

    let mut sql = String::from(BASE_SELECT);
    if !conditions.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&conditions.join("\n  AND "));
    }
    sql.push_str("\nORDER BY f.rowid, d.id");

    Ok(CompiledQuery {
        sql,
        params: sink.into_params(),
    })
}

fn compile_column_filter(
    filter: &ColumnFilter,
    sink: &mut ParamSink,
) -> Result<String, FilterError> {
    if !FACT_COLUMNS.contains(&filter.column.as_str()) {
        return Err(FilterError::UnknownColumn {
            column: filter.column.clone(),
        });
    }
    if filter.comparator != Comparator::Eq {
        return Err(FilterError::ColumnComparatorUnsupported {
            column: filter.column.clone(),
            token: filter.comparator.token().to_string(),
        });
    }

    let placeholder = sink.bind(ParamValue::Text(filter.value.clone()));
    Ok(format!("f.{} = {}", filter.column, placeholder))
}

fn compile_dimension_filter(filter: &TypedDimensionFilter, sink: &mut ParamSink) -> String {
    let key_placeholder = sink.bind(ParamValue::Text(filter.filter.key.clone()));

    let branches: Vec<String> = filter
        .types
        .iter()
        .map(|data_type| compile_branch(*data_type, &filter.filter.value, filter.filter.comparator, sink))
        .collect();

    format!(
        "EXISTS (\n    SELECT 1 FROM json_each(f.dimensions) AS e\n    WHERE json_extract(e.value, '$.key') = {}\n      AND ({})\n  )",
        key_placeholder,
        branches.join(" OR ")
    )
}

/// One type interpretation of a dimension comparison. The stored value is
/// guarded by the type's pattern before any cast; the filter value is
/// coerced here, at compile time, with the same rules.
fn compile_branch(
    data_type: DimensionType,
    raw_value: &str,
    comparator: Comparator,
    sink: &mut ParamSink,
) -> String {
    let op = comparator.sql();
    match (data_type, DimensionValue::coerce(raw_value, data_type)) {
        (DimensionType::Number, Some(DimensionValue::Number(number))) => {
            let guard = sink.bind(ParamValue::Text(NUMBER_PATTERN.to_string()));
            let value = sink.bind(ParamValue::Real(number));
            format!("(regexp({guard}, {DIM_VALUE}) AND CAST({DIM_VALUE} AS REAL) {op} {value})")
        }
        (DimensionType::Boolean, Some(DimensionValue::Bool(flag))) => {
            let guard = sink.bind(ParamValue::Text(BOOLEAN_PATTERN.to_string()));
            let value = sink.bind(ParamValue::Int(i64::from(flag)));
            format!(
                "(regexp({guard}, {DIM_VALUE}) AND (CASE WHEN lower({DIM_VALUE}) = 'true' THEN 1 ELSE 0 END) {op} {value})"
            )
        }
        (DimensionType::Date, Some(DimensionValue::Date(timestamp))) => {
            let guard = sink.bind(ParamValue::Text(DATE_PATTERN.to_string()));
            let value = sink.bind(ParamValue::Text(
                timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ));
            format!("(regexp({guard}, {DIM_VALUE}) AND datetime({DIM_VALUE}) {op} datetime({value}))")
        }
        (DimensionType::String, _) => {
            let value = sink.bind(ParamValue::Text(raw_value.to_string()));
            format!("({DIM_VALUE} {op} {value})")
        }
        _ => NO_MATCH.to_string(),
    }
}
