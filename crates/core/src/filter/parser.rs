//! Parser for bracket-notation filter pairs
//!
//! Query strings arrive as decoded `(key, value)` pairs in the shape
//! `filter[field][operator]=value` / `dim[key][operator]=value`, with the
//! operator segment optional (`eq` implied). The bracket key path is parsed
//! with a pest grammar; pairs whose key is neither a `filter` nor a `dim`
//! path belong to other request concerns and are ignored here.

use pest::Parser;
use pest_derive::Parser;

use crate::filter::ast::{ColumnFilter, Comparator, DimensionFilter, FilterSet};
use crate::filter::error::FilterError;

#[derive(Parser)]
#[grammar = "filter/grammar.pest"]
struct BracketKeyParser;

const FILTER_PREFIX: &str = "filter";
const DIMENSION_PREFIX: &str = "dim";

/// Parse decoded query pairs into an ordered filter set. Pair order is
/// preserved so the compiled SQL and its parameter names are reproducible.
pub fn parse_filter_pairs(pairs: &[(String, String)]) -> Result<FilterSet, FilterError> {
    let mut set = FilterSet::default();

    for (raw_key, value) in pairs {
        let Some((root, segments)) = parse_bracket_key(raw_key) else {
            if has_filter_prefix(raw_key) {
                return Err(FilterError::MalformedKey {
                    raw: raw_key.clone(),
                });
            }
            continue;
        };

        match root.as_str() {
            FILTER_PREFIX => {
                let (field, comparator) = split_segments(raw_key, &segments)?;
                set.columns.push(ColumnFilter {
                    column: field,
                    comparator,
                    value: value.clone(),
                });
            }
            DIMENSION_PREFIX => {
                let (key, comparator) = split_segments(raw_key, &segments)?;
                set.dimensions.push(DimensionFilter {
                    key,
                    comparator,
                    value: value.clone(),
                });
            }
            _ => {}
        }
    }

    Ok(set)
}

/// Extract the target name and comparator from the bracket segments. One
/// segment means the default `eq` comparator; two mean an explicit one.
fn split_segments(raw_key: &str, segments: &[String]) -> Result<(String, Comparator), FilterError> {
    match segments {
        [field] => Ok((field.clone(), Comparator::Eq)),
        [field, operator] => Ok((field.clone(), Comparator::parse(operator)?)),
        _ => Err(FilterError::MalformedKey {
            raw: raw_key.to_string(),
        }),
    }
}

fn parse_bracket_key(raw: &str) -> Option<(String, Vec<String>)> {
    let mut parsed = BracketKeyParser::parse(Rule::bracket_key, raw).ok()?;
    let key = parsed.next()?;

    let mut inner = key.into_inner();
    let root = inner.next()?.as_str().to_string();
    let mut segments = Vec::new();
    for pair in inner {
        if pair.as_rule() == Rule::segment {
            segments.push(pair.into_inner().next()?.as_str().to_string());
        }
    }

    Some((root, segments))
}

fn has_filter_prefix(raw: &str) -> bool {
    [FILTER_PREFIX, DIMENSION_PREFIX]
        .iter()
        .any(|prefix| raw == *prefix || raw.starts_with(&format!("{prefix}[")))
}
