//! Conversion between instants and their string representations.
//!
//! Every instant that enters or leaves the service goes through this module so that
//! parsing and formatting agree on a single canonical layout.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::validation::{ValidationError, ValidationResult};

/// Layout used whenever an instant is rendered as text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layouts carrying a time component, tried in order.
const DATETIME_LAYOUTS: [&str; 2] = [DATETIME_FORMAT, "%Y-%m-%d %H:%M"];

/// Date-only layout, resolved to midnight. Tried last.
const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parse `raw` against the accepted layouts; the first one that matches wins.
///
/// `field` is only used to build the error when no layout matches.
pub fn parse_datetime(field: &'static str, raw: &str) -> ValidationResult<NaiveDateTime> {
    let value = raw.trim();

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_LAYOUT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| ValidationError::InvalidDatetime {
            field,
            value: raw.to_string(),
        })
}

/// Render an instant in the canonical layout.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Serde adapter for required instants.
pub mod canonical {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::format_datetime;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_datetime(value))
    }
}

/// Serde adapter for nullable instants. `None` is written as `null`.
pub mod canonical_option {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::format_datetime;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&format_datetime(value)),
            None => serializer.serialize_none(),
        }
    }
}
