//! Request body extraction with the crate's error shape.
//!
//! [`JsonBody`] behaves like [`axum::Json`] but rejects with [`Error`], so a malformed body is
//! answered like any other validation failure: a `400` with a JSON body.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::errors::Error;
use crate::validation::{FieldErrors, NON_FIELD_ERRORS};

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape, e.g. a number where a string is expected
            JsonRejection::JsonDataError(err) => Error::Validation {
                errors: data_error_fields(&err.body_text()),
            },
            JsonRejection::JsonSyntaxError(_) => Error::BadRequest {
                message: "Malformed JSON body".to_string(),
            },
            JsonRejection::MissingJsonContentType(_) => Error::BadRequest {
                message: "Expected request with `Content-Type: application/json`".to_string(),
            },
            other => Error::BadRequest { message: other.body_text() },
        }
    }
}

/// Key a deserialization failure by the field it concerns.
///
/// The text reads `<context>: <field path>: <message>`; when there is no single field path the
/// message is reported under [`NON_FIELD_ERRORS`].
fn data_error_fields(text: &str) -> FieldErrors {
    let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && path.chars().all(|c| c.is_alphanumeric() || c == '_') => {
            FieldErrors::single(path, message)
        }
        _ => FieldErrors::single(NON_FIELD_ERRORS, detail),
    }
}
