use thiserror::Error;
use validator::ValidationErrors;

/// Result type returned by the normalization and filter helpers.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raised when raw input cannot be coerced into a promotion or a filter.
///
/// Every variant names the offending field so the boundary can report it back to the client.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The request body is not a JSON object.
    #[error("body of request contained bad or no data: expected a JSON object")]
    NotAnObject,
    /// A field required to build a new promotion was not supplied.
    #[error("invalid promotion: missing {field}")]
    Missing { field: &'static str },
    /// The JSON value has the wrong shape for the field.
    #[error("invalid attribute: {field} must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// The value is not one of the declared enum members.
    #[error("'{value}' is not a valid {field}")]
    InvalidEnum { field: &'static str, value: String },
    /// None of the accepted datetime layouts matched.
    #[error("invalid date format: {value} for {field} does not conform to any valid datetime format")]
    InvalidDatetime { field: &'static str, value: String },
    /// The value is not a UUID.
    #[error("'{value}' is not a valid UUID for {field}")]
    InvalidUuid { field: &'static str, value: String },
    /// The value is neither `true` nor `false`.
    #[error("'{value}' is not a valid boolean for {field}")]
    InvalidBoolean { field: &'static str, value: String },
    /// A list-valued filter names no member once separators are stripped.
    #[error("'{value}' names no {field} member")]
    EmptyList { field: &'static str, value: String },
    /// Length or range constraints checked by `validator`.
    #[error("validation failed: {0}")]
    Constraints(#[from] ValidationErrors),
}
