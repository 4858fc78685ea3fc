use std::sync::Arc;

use regex::Regex;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Register the `regexp(pattern, text)` scalar function backing the
/// comparison-branch guards. The compiled pattern is cached as auxiliary
/// data, so each guard compiles once per statement. NULL text (a missing
/// JSON field) never matches.
pub fn register_regexp(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        move |ctx| {
            let pattern: Arc<Regex> = ctx.get_or_create_aux(0, |value| -> Result<_, BoxError> {
                Ok(Regex::new(value.as_str()?)?)
            })?;

            let text = ctx
                .get_raw(1)
                .as_str_or_null()
                .map_err(|error| rusqlite::Error::UserFunctionError(error.into()))?;

            Ok(text.map(|text| pattern.is_match(text)).unwrap_or(false))
        },
    )
}
