//! Typed filter conditions parsed from bracket-notation query strings

use serde::{Deserialize, Serialize};

use crate::filter::error::FilterError;

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
}

impl Comparator {
    /// Parse an operator segment token. Tokens outside the supported set
    /// are a client error, never a fallthrough.
    pub fn parse(token: &str) -> Result<Self, FilterError> {
        match token {
            "eq" => Ok(Comparator::Eq),
            "gt" => Ok(Comparator::Gt),
            "gte" => Ok(Comparator::Gte),
            "lt" => Ok(Comparator::Lt),
            "lte" => Ok(Comparator::Lte),
            "ne" => Ok(Comparator::Ne),
            _ => Err(FilterError::UnsupportedComparator {
                token: token.to_string(),
            }),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Gt => "gt",
            Comparator::Gte => "gte",
            Comparator::Lt => "lt",
            Comparator::Lte => "lte",
            Comparator::Ne => "ne",
        }
    }

    /// The SQL comparison operator this maps to.
    pub fn sql(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Ne => "<>",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Equality condition on an ordinary fact column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub comparator: Comparator,
    pub value: String,
}

/// Condition on a dimension value, interpreted per the types declared for
/// the key across fact types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub key: String,
    pub comparator: Comparator,
    pub value: String,
}

/// All conditions of one query, in arrival order. Conditions combine
/// conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub columns: Vec<ColumnFilter>,
    pub dimensions: Vec<DimensionFilter>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.dimensions.is_empty()
    }
}
