//! # Rejection Conversions
//!
//! Axum extractor rejections turned into [`AppError`] so that malformed
//! bodies, query strings and path segments answer with the JSON envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Pulls the field name out of serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    let start = message.find("missing field `")? + "missing field `".len();
    let len = message[start ..].find('`')?;
    Some(&message[start .. start + len])
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            // Well-formed JSON of the wrong shape
            JsonRejection::JsonDataError(_) => {
                match missing_field(&message) {
                    Some(field) => AppError::validation(format!("{}: Missing required field", field)),
                    None => AppError::validation(message),
                }
            },
            _ => AppError::bad_request(message),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self { AppError::bad_request(rejection.body_text()) }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => AppError::bad_request(rejection.body_text()),
            _ => AppError::internal(rejection.body_text()),
        }
    }
}
