//! Request-scoped identity context.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::domain::Role;
use crate::error::AppError;

/// Identity published into request extensions by the authentication gate.
///
/// Lives for one request only; never persisted or shared across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentUser>()
                .copied()
                .ok_or_else(|| AppError::unauthorized("Authentication required")),
        )
    }
}
