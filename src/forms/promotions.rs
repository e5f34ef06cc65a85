use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::domain::datetime::parse_datetime;
use crate::domain::promotion::{NewPromotion, Promotion, PromotionScope, PromotionType};
use crate::domain::validation::{ValidationError, ValidationResult};

/// Maximum allowed length for a promotion name.
const NAME_MAX_LEN: u64 = 63;
/// Maximum allowed length for a promotion description.
const DESCRIPTION_MAX_LEN: u64 = 255;
/// Maximum allowed length for a promotion code.
const CODE_MAX_LEN: u64 = 63;

/// Fields read from a JSON body, each already coerced to its declared type.
///
/// `None` means the key was absent, `null` or an empty string; such fields keep whatever value
/// the target record already has when the payload is merged.
#[derive(Debug, Default, Clone, PartialEq, Validate)]
pub struct PromotionPayload {
    #[validate(length(max = NAME_MAX_LEN))]
    pub promotion_name: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    pub promotion_description: Option<String>,
    pub promotion_type: Option<PromotionType>,
    pub promotion_scope: Option<PromotionScope>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub promotion_value: Option<f64>,
    #[validate(length(max = CODE_MAX_LEN))]
    pub promotion_code: Option<String>,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
    pub created_when: Option<NaiveDateTime>,
    pub modified_when: Option<NaiveDateTime>,
}

impl PromotionPayload {
    /// Coerce every recognised key of `input`; the first failure aborts the whole payload.
    ///
    /// `promotion_id`, `active` and unknown keys are ignored.
    pub fn from_json(input: &Value) -> ValidationResult<Self> {
        let fields = input.as_object().ok_or(ValidationError::NotAnObject)?;

        let payload = Self {
            promotion_name: text(fields, "promotion_name")?,
            promotion_description: text(fields, "promotion_description")?,
            promotion_type: coerce(fields, "promotion_type", PromotionType::parse)?,
            promotion_scope: coerce(fields, "promotion_scope", PromotionScope::parse)?,
            start_date: instant(fields, "start_date")?,
            end_date: instant(fields, "end_date")?,
            promotion_value: number(fields, "promotion_value")?,
            promotion_code: text(fields, "promotion_code")?,
            created_by: uuid(fields, "created_by")?,
            modified_by: uuid(fields, "modified_by")?,
            created_when: instant(fields, "created_when")?,
            modified_when: instant(fields, "modified_when")?,
        };
        payload.validate()?;

        Ok(payload)
    }

    /// Overlay the supplied fields onto `existing`.
    ///
    /// Identifier and active flag always come from `existing`.
    pub fn merge_into(self, existing: Promotion) -> Promotion {
        Promotion {
            promotion_id: existing.promotion_id,
            promotion_name: self.promotion_name.unwrap_or(existing.promotion_name),
            promotion_description: self
                .promotion_description
                .unwrap_or(existing.promotion_description),
            promotion_type: self.promotion_type.unwrap_or(existing.promotion_type),
            promotion_scope: self.promotion_scope.unwrap_or(existing.promotion_scope),
            start_date: self.start_date.unwrap_or(existing.start_date),
            end_date: self.end_date.unwrap_or(existing.end_date),
            promotion_value: self.promotion_value.unwrap_or(existing.promotion_value),
            promotion_code: self.promotion_code.or(existing.promotion_code),
            created_by: self.created_by.unwrap_or(existing.created_by),
            modified_by: self.modified_by.or(existing.modified_by),
            created_when: self.created_when.unwrap_or(existing.created_when),
            modified_when: self.modified_when.or(existing.modified_when),
            active: existing.active,
        }
    }

    /// Build an insert payload, failing on the first required field that was not supplied.
    ///
    /// `created_when` falls back to `now`. New promotions start inactive.
    pub fn into_new_promotion(self, now: NaiveDateTime) -> ValidationResult<NewPromotion> {
        Ok(NewPromotion {
            promotion_name: required(self.promotion_name, "promotion_name")?,
            promotion_description: required(self.promotion_description, "promotion_description")?,
            promotion_type: required(self.promotion_type, "promotion_type")?,
            promotion_scope: required(self.promotion_scope, "promotion_scope")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
            promotion_value: required(self.promotion_value, "promotion_value")?,
            promotion_code: self.promotion_code,
            created_by: required(self.created_by, "created_by")?,
            modified_by: self.modified_by,
            created_when: self.created_when.unwrap_or(now),
            modified_when: self.modified_when,
            active: false,
        })
    }
}

/// Merge `input` over `existing` without touching it. Every field is coerced before any is applied.
pub fn normalize(existing: &Promotion, input: &Value) -> ValidationResult<Promotion> {
    let payload = PromotionPayload::from_json(input)?;
    Ok(payload.merge_into(existing.clone()))
}

/// Normalize `input` over an empty record into an insert payload.
pub fn normalize_new(input: &Value, now: NaiveDateTime) -> ValidationResult<NewPromotion> {
    PromotionPayload::from_json(input)?.into_new_promotion(now)
}

/// Whether `input` meaningfully provides `key`, using the same rules as the normalizer.
pub fn supplies(input: &Value, key: &str) -> bool {
    input
        .as_object()
        .and_then(|fields| provided(fields, key))
        .is_some()
}

/// Raw value of `key` when it was meaningfully provided.
fn provided<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) if value.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}

fn as_str<'a>(field: &'static str, value: &'a Value) -> ValidationResult<&'a str> {
    value.as_str().ok_or(ValidationError::WrongType {
        field,
        expected: "string",
    })
}

fn text(fields: &Map<String, Value>, field: &'static str) -> ValidationResult<Option<String>> {
    provided(fields, field)
        .map(|value| as_str(field, value).map(str::to_string))
        .transpose()
}

fn coerce<T>(
    fields: &Map<String, Value>,
    field: &'static str,
    parse: fn(&str) -> ValidationResult<T>,
) -> ValidationResult<Option<T>> {
    provided(fields, field)
        .map(|value| as_str(field, value).and_then(parse))
        .transpose()
}

fn instant(
    fields: &Map<String, Value>,
    field: &'static str,
) -> ValidationResult<Option<NaiveDateTime>> {
    provided(fields, field)
        .map(|value| as_str(field, value).and_then(|raw| parse_datetime(field, raw)))
        .transpose()
}

fn number(fields: &Map<String, Value>, field: &'static str) -> ValidationResult<Option<f64>> {
    provided(fields, field)
        .map(|value| {
            value.as_f64().ok_or(ValidationError::WrongType {
                field,
                expected: "number",
            })
        })
        .transpose()
}

fn uuid(fields: &Map<String, Value>, field: &'static str) -> ValidationResult<Option<Uuid>> {
    provided(fields, field)
        .map(|value| {
            as_str(field, value).and_then(|raw| {
                Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidUuid {
                    field,
                    value: raw.to_string(),
                })
            })
        })
        .transpose()
}

fn required<T>(value: Option<T>, field: &'static str) -> ValidationResult<T> {
    value.ok_or(ValidationError::Missing { field })
}
