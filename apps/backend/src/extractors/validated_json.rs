use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// Validated JSON extractor that provides standardized error handling for
/// JSON parse/validation failures.
///
/// This extractor deserializes request bodies and converts any JSON
/// parse/validation failures into our standardized AppError (RFC 7807 with
/// trace_id) using HTTP 400 and the canonical bad-request error code.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Extract the inner value from the ValidatedJson wrapper
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(
                        trace_id = %trace_id,
                        error = %e,
                        "Failed to read request body chunk"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                let detail = classify_json_error(&e);

                debug!(
                    trace_id = %trace_id,
                    body_size = body.len(),
                    "JSON parsing failed"
                );

                AppError::bad_request(ErrorCode::BadRequest, detail)
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Classify serde_json::Error and return a sanitized error message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct TestStruct {
        pub name: String,
        pub age: u32,
    }

    #[test]
    fn test_classify_json_error_syntax() {
        let json = r#"{"name": "test", "age": }"#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("Invalid JSON"));
    }

    #[test]
    fn test_classify_json_error_eof() {
        let json = r#"{"name": "test""#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("unexpected end of input"));
    }

    #[test]
    fn test_classify_json_error_data() {
        let json = r#"{"name": 123, "age": "invalid"}"#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("wrong types"));
    }

    #[test]
    fn test_validated_json_deref_and_into_inner() {
        let mut validated = ValidatedJson(TestStruct {
            name: "test".to_string(),
            age: 42,
        });
        assert_eq!(validated.name, "test");
        validated.age = 24;
        assert_eq!(validated.into_inner().age, 24);
    }
}
