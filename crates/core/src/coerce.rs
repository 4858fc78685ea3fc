//! Guarded coercion of stored dimension text
//!
//! Dimension values rest as strings; their logical type is recovered only
//! when needed. Each non-string type has a guard pattern that a raw value
//! must match before it is parsed, so mismatched data degrades to "no
//! match" instead of a cast failure. The same patterns are bound into the
//! compiled SQL as the `regexp` guards of each comparison branch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::model::DimensionType;

/// Decimal number, optional sign and fraction.
pub const NUMBER_PATTERN: &str = r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$";

/// Boolean literal, case-insensitive.
pub const BOOLEAN_PATTERN: &str = r"(?i)^(?:true|false)$";

/// ISO-8601-like date or timestamp, optional time and offset.
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[T ][0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?(?:Z|[+-][0-9]{2}:?[0-9]{2})?)?$";

lazy_static! {
    static ref NUMBER_GUARD: Regex = Regex::new(NUMBER_PATTERN).expect("number guard pattern");
    static ref BOOLEAN_GUARD: Regex = Regex::new(BOOLEAN_PATTERN).expect("boolean guard pattern");
    static ref DATE_GUARD: Regex = Regex::new(DATE_PATTERN).expect("date guard pattern");
}

/// A dimension value recovered into its declared logical type.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDateTime),
}

impl DimensionValue {
    /// Interpret a raw stored string as the given type. Returns `None`
    /// when the guard rejects the text; `Text` always succeeds.
    pub fn coerce(raw: &str, target: DimensionType) -> Option<Self> {
        match target {
            DimensionType::Number => {
                if !NUMBER_GUARD.is_match(raw) {
                    return None;
                }
                raw.parse::<f64>().ok().map(DimensionValue::Number)
            }
            DimensionType::Boolean => {
                if !BOOLEAN_GUARD.is_match(raw) {
                    return None;
                }
                Some(DimensionValue::Bool(raw.eq_ignore_ascii_case("true")))
            }
            DimensionType::Date => {
                if !DATE_GUARD.is_match(raw) {
                    return None;
                }
                parse_timestamp(raw).map(DimensionValue::Date)
            }
            DimensionType::String => Some(DimensionValue::Text(raw.to_string())),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercion() {
        assert_eq!(
            DimensionValue::coerce("72", DimensionType::Number),
            Some(DimensionValue::Number(72.0))
        );
        assert_eq!(
            DimensionValue::coerce("-0.5", DimensionType::Number),
            Some(DimensionValue::Number(-0.5))
        );
        assert_eq!(DimensionValue::coerce("n/a", DimensionType::Number), None);
        assert_eq!(DimensionValue::coerce("1e5", DimensionType::Number), None);
        assert_eq!(DimensionValue::coerce("", DimensionType::Number), None);
    }

    #[test]
    fn test_boolean_coercion_case_insensitive() {
        assert_eq!(
            DimensionValue::coerce("TRUE", DimensionType::Boolean),
            Some(DimensionValue::Bool(true))
        );
        assert_eq!(
            DimensionValue::coerce("false", DimensionType::Boolean),
            Some(DimensionValue::Bool(false))
        );
        assert_eq!(DimensionValue::coerce("yes", DimensionType::Boolean), None);
        assert_eq!(DimensionValue::coerce("0", DimensionType::Boolean), None);
    }

    #[test]
    fn test_date_coercion() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            DimensionValue::coerce("2024-03-01", DimensionType::Date),
            Some(DimensionValue::Date(midnight))
        );
        assert!(DimensionValue::coerce("2024-03-01T08:30:00Z", DimensionType::Date).is_some());
        assert!(DimensionValue::coerce("2024-03-01 08:30:00", DimensionType::Date).is_some());
        assert_eq!(DimensionValue::coerce("yesterday", DimensionType::Date), None);
        assert_eq!(DimensionValue::coerce("2024-3-1", DimensionType::Date), None);
    }

    #[test]
    fn test_text_always_coerces() {
        assert_eq!(
            DimensionValue::coerce("n/a", DimensionType::String),
            Some(DimensionValue::Text("n/a".to_string()))
        );
    }
}
