//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field-level failures become `invalid_request` errors whose `details`
//! carry the offending field and a stable code.

use serde_json::json;

use crate::domain::{CourseId, CourseName, CourseValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    Blank,
    NullCharacter,
    TooLong,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::Blank => "blank",
            Self::NullCharacter => "null_character",
            Self::TooLong => "too_long",
        }
    }
}

impl From<&CourseValidationError> for ValidationCode {
    fn from(value: &CourseValidationError) -> Self {
        match value {
            CourseValidationError::EmptyId => Self::MissingField,
            CourseValidationError::InvalidId => Self::InvalidUuid,
            CourseValidationError::BlankName => Self::Blank,
            CourseValidationError::NameContainsNul => Self::NullCharacter,
            CourseValidationError::NameTooLong { .. } => Self::TooLong,
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const ID_FIELD: FieldName = FieldName::new("id");
pub(crate) const NAME_FIELD: FieldName = FieldName::new("name");

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field_name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {field_name}"),
    )
}

fn course_field_error(field: FieldName, error: &CourseValidationError) -> Error {
    field_error(field, ValidationCode::from(error), error.to_string())
}

/// Normalise a query filter value. Blank values mean "no filter".
pub(crate) fn filter_value(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Check a `name` query filter. NUL characters can never match a stored name.
pub(crate) fn parse_course_name_filter(value: String) -> Result<String, Error> {
    if value.contains('\0') {
        return Err(course_field_error(
            NAME_FIELD,
            &CourseValidationError::NameContainsNul,
        ));
    }
    Ok(value)
}

/// Parse an `id` query filter. Malformed values are a client error.
pub(crate) fn parse_course_id_filter(value: &str) -> Result<CourseId, Error> {
    CourseId::new(value).map_err(|err| course_field_error(ID_FIELD, &err))
}

/// Parse an `id` path segment.
///
/// A value that is not a UUID cannot identify a stored course, so it is
/// reported as `not_found` rather than as a validation failure.
pub(crate) fn parse_course_id_path(value: &str) -> Result<CourseId, Error> {
    CourseId::new(value).map_err(|_| Error::not_found(format!("course {value} not found")))
}

/// Validate an optional `name` field, returning `None` when absent.
pub(crate) fn parse_optional_course_name(
    value: Option<String>,
) -> Result<Option<CourseName>, Error> {
    value
        .map(|raw| CourseName::new(raw).map_err(|err| course_field_error(NAME_FIELD, &err)))
        .transpose()
}

/// Validate a required `name` field.
pub(crate) fn parse_required_course_name(value: Option<String>) -> Result<CourseName, Error> {
    parse_optional_course_name(value)?.ok_or_else(|| missing_field_error(NAME_FIELD))
}
