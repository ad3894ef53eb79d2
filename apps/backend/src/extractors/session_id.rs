use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Session ID extracted from the route path parameter.
///
/// Only validates the shape (a UUID); whether the session exists is the
/// services' concern.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("session_id") {
            None => Err(AppError::bad_request(
                ErrorCode::InvalidSessionId,
                "Missing session_id parameter",
            )),
            Some(raw) => raw.parse::<Uuid>().map(SessionId).map_err(|_| {
                AppError::bad_request(
                    ErrorCode::InvalidSessionId,
                    format!("Invalid session id: {raw}"),
                )
            }),
        };
        ready(result)
    }
}
