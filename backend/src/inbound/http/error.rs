//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into a status code and an `{"error": "..."}` body in one place.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::{Error, ErrorKind};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error envelope returned to clients.
///
/// Example JSON: `{"error":"Reddit user not found"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::UpstreamAuthFailure => StatusCode::UNAUTHORIZED,
        ErrorKind::SubjectNotFound | ErrorKind::NoContent => StatusCode::NOT_FOUND,
        ErrorKind::UpstreamProtocolError | ErrorKind::CompletionFailure | ErrorKind::Unknown => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Client-facing text; server-side failures are prefixed with `Error: `.
fn public_message(error: &Error) -> String {
    if status_for(error.kind()).is_server_error() {
        format!("Error: {}", error.message())
    } else {
        error.message().to_owned()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                kind = %self.kind(),
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorResponse {
            error: public_message(self),
        })
    }
}

/// Message for requests that carry no body to read a username from.
const USERNAME_REQUIRED_MESSAGE: &str = "Username is required";

/// serde_json reports an empty input as EOF before the first column.
fn is_empty_body(error: &serde_json::Error) -> bool {
    error.is_eof() && error.line() == 1 && error.column() == 0
}

/// `JsonConfig` error handler turning body decoding failures into
/// `InvalidInput` responses with the standard envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => USERNAME_REQUIRED_MESSAGE.to_owned(),
        JsonPayloadError::Deserialize(inner) if is_empty_body(inner) => {
            USERNAME_REQUIRED_MESSAGE.to_owned()
        }
        JsonPayloadError::Deserialize(inner) if inner.is_data() => {
            format!("Invalid request body: {inner}")
        }
        _ => "Malformed JSON body".to_owned(),
    };
    Error::invalid_input(message).into()
}

#[cfg(test)]
mod tests;
