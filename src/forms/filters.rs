use serde::Deserialize;

use crate::domain::datetime::parse_datetime;
use crate::domain::promotion::{PromotionFilter, PromotionScope, PromotionType};
use crate::domain::validation::{ValidationError, ValidationResult};

/// Query string accepted by the promotions listing.
///
/// Every key is optional. List-valued keys take comma separated member names.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PromotionFilterQuery {
    /// Instant that has to fall inside the validity window.
    pub datetime: Option<String>,
    /// Comma separated scope names.
    pub promotion_scope: Option<String>,
    /// Comma separated type names.
    pub promotion_type: Option<String>,
    /// `true` or `false`.
    pub active: Option<String>,
}

impl PromotionFilterQuery {
    /// Compile the supplied keys into a filter. Absent or blank keys add no criterion.
    pub fn into_filter(self) -> ValidationResult<PromotionFilter> {
        let mut filter = PromotionFilter::all();

        if let Some(raw) = supplied(&self.datetime) {
            filter = filter.valid_at(parse_datetime("datetime", raw)?);
        }

        if let Some(raw) = supplied(&self.promotion_scope) {
            filter = filter.scopes(parse_list("promotion_scope", raw, PromotionScope::parse)?);
        }

        if let Some(raw) = supplied(&self.promotion_type) {
            filter = filter.types(parse_list("promotion_type", raw, PromotionType::parse)?);
        }

        if let Some(raw) = supplied(&self.active) {
            filter = filter.active(parse_flag("active", raw)?);
        }

        Ok(filter)
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|raw| !raw.is_empty())
}

/// Comma separated member names. A list naming no member at all is rejected.
fn parse_list<T>(
    field: &'static str,
    raw: &str,
    parse: fn(&str) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    let members = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(parse)
        .collect::<ValidationResult<Vec<T>>>()?;

    if members.is_empty() {
        return Err(ValidationError::EmptyList {
            field,
            value: raw.to_string(),
        });
    }

    Ok(members)
}

fn parse_flag(field: &'static str, raw: &str) -> ValidationResult<bool> {
    match raw.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            field,
            value: raw.to_string(),
        }),
    }
}
