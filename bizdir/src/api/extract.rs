//! Request extraction with validation.
//!
//! [`ValidatedJson`] behaves like [`axum::Json`] but turns every rejection (missing content type,
//! malformed JSON, missing or mistyped fields) and every [`Validate`] failure into a 400 with the
//! usual `{"error": ...}` body, before a handler runs. [`PathId`] does the same for path
//! parameters, so `/businesses/abc` is answered with a JSON 400 rather than plain text.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::errors::Error;

/// Field-level validation that runs after a body deserializes successfully
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Accumulated field errors, reported together
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    /// Required string fields must contain something other than whitespace
    pub fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::BadRequest {
            message: errors.to_string(),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => err.body_text(),
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON".to_string(),
            JsonRejection::MissingJsonContentType(_) => "Missing or invalid Content-Type header. Expected 'application/json'".to_string(),
            JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
            _ => "Invalid JSON request".to_string(),
        };
        Error::BadRequest { message }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => Error::BadRequest { message: err.body_text() },
            // Only reachable when a handler is mounted on a route without the parameter
            other => Error::Internal {
                operation: format!("extract path parameters: {}", other.body_text()),
            },
        }
    }
}

/// Path parameter extractor whose rejections render as JSON errors
#[derive(Debug, Clone)]
pub struct PathId<T>(pub T);

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathId(value))
    }
}

/// JSON body extractor that rejects invalid input with a 400
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
