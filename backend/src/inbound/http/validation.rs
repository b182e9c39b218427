//! Shared validation helpers for inbound HTTP adapters.
//!
//! Everything here rejects input before a domain service is called, so a
//! malformed identifier or payload never reaches storage.

use std::str::FromStr;

use serde_json::{Value, json};

use crate::domain::{ArticleId, CommentId, Error, IdentifierValidationError, VoteDelta};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidIdentifier,
    InvalidVoteDelta,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidIdentifier => "invalid_identifier",
            ErrorCode::InvalidVoteDelta => "invalid_vote_delta",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ARTICLE_ID: FieldName = FieldName::new("article_id");
pub(crate) const COMMENT_ID: FieldName = FieldName::new("comment_id");
pub(crate) const INC_VOTES: FieldName = FieldName::new("inc_votes");

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::malformed_input(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn invalid_identifier_error(
    field: FieldName,
    value: &str,
    cause: &IdentifierValidationError,
) -> Error {
    let field = field.as_str();
    Error::malformed_input(format!("invalid {field}: {cause}")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidIdentifier.as_str(),
    }))
}

fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdentifierValidationError>,
{
    value
        .parse()
        .map_err(|cause| invalid_identifier_error(field, value, &cause))
}

pub(crate) fn parse_article_id(value: &str) -> Result<ArticleId, Error> {
    parse_id(value, ARTICLE_ID)
}

pub(crate) fn parse_comment_id(value: &str) -> Result<CommentId, Error> {
    parse_id(value, COMMENT_ID)
}

/// Read a required string field from a deserialised payload.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// `inc_votes` must be present and a JSON integer that fits 32 bits.
pub(crate) fn parse_vote_delta(value: Option<Value>) -> Result<VoteDelta, Error> {
    let value = value.ok_or_else(|| missing_field_error(INC_VOTES))?;
    value
        .as_i64()
        .and_then(|raw| i32::try_from(raw).ok())
        .map(VoteDelta::new)
        .ok_or_else(|| {
            Error::malformed_input("inc_votes must be an integer").with_details(json!({
                "field": INC_VOTES.as_str(),
                "value": value,
                "code": ErrorCode::InvalidVoteDelta.as_str(),
            }))
        })
}
