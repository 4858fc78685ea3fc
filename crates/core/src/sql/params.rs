//! Named parameter bindings for compiled statements

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;

/// A value bound to a named placeholder. Filter values and guard patterns
/// only ever travel through these bindings, never through the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Real(f64),
    Int(i64),
}

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ParamValue::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            ParamValue::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            ParamValue::Int(value) => ToSqlOutput::Owned(Value::Integer(*value)),
        })
    }
}

/// Issues `:pN` placeholder names in compile order, so identical inputs
/// always compile to byte-identical statements.
#[derive(Debug, Default)]
pub struct ParamSink {
    params: Vec<(String, ParamValue)>,
}

impl ParamSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return the placeholder name to splice into the
    /// statement text.
    pub fn bind(&mut self, value: ParamValue) -> String {
        let name = format!(":p{}", self.params.len());
        self.params.push((name.clone(), value));
        name
    }

    pub fn into_params(self) -> Vec<(String, ParamValue)> {
        self.params
    }
}

/// A finished statement: SQL text plus its named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<(String, ParamValue)>,
}

impl CompiledQuery {
    /// Parameter slice in the form rusqlite's named-parameter binding
    /// expects.
    pub fn param_refs(&self) -> Vec<(&str, &dyn ToSql)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}
