//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning domain
//! failures, extractor failures and unmatched routes into one JSON envelope
//! with a matching status code.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned for every internal failure, whatever the cause.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// HTTP status code, repeated in the body.
    #[schema(example = 404)]
    pub status: u16,
    /// Stable machine-readable kind.
    #[schema(example = "not_found")]
    pub code: String,
    /// Human-readable message.
    #[schema(example = "article not found")]
    pub message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field-level context for malformed input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedInput => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        let code = error.code();
        let internal = code == ErrorCode::Internal;
        Self {
            status: status_for(code).as_u16(),
            code: code.as_str().to_owned(),
            message: if internal {
                INTERNAL_MESSAGE.to_owned()
            } else {
                error.message().to_owned()
            },
            trace_id: error.trace_id().map(str::to_owned),
            details: if internal {
                None
            } else {
                error.details().cloned()
            },
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

fn malformed(message: &str, code: &'static str, cause: &dyn std::fmt::Display) -> Error {
    debug!(%cause, code, "request rejected by extractor");
    Error::malformed_input(message).with_details(json!({ "code": code }))
}

/// Error handler for `web::JsonConfig`: unparsable or mistyped bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::ContentType => {
            malformed("request body must be JSON", "invalid_content_type", &err)
        }
        _ => malformed("request body is not valid JSON", "invalid_json", &err),
    };
    error.into()
}

/// Error handler for `web::QueryConfig`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed("query string is malformed", "invalid_query", &err).into()
}

/// Error handler for `web::PathConfig`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    malformed("path parameter is malformed", "invalid_path", &err).into()
}

/// Default service for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found("route not found").with_details(json!({ "path": req.path() })))
}

#[cfg(test)]
mod tests;
