//! Authentication gate.
//!
//! Extracts the bearer token from the Authorization header, verifies it, and
//! stores the resulting identity in request extensions. Runs on every
//! protected route and rejects with 401 before any handler is reached.
//! Verification failures all map to the same generic message so callers
//! cannot probe which check failed.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

/// Terminate the request with the error's JSON response.
pub(crate) fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    let response = err.error_response().map_into_right_body();
    ServiceResponse::new(request, response)
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();

        // The header must be well-formed before the token service is consulted.
        let token = match bearer_token(auth_header.as_ref()) {
            Ok(token) => token,
            Err(err) => return Box::pin(ready(Ok(reject(req, err)))),
        };

        let app_state = match req.app_data::<web::Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                return Box::pin(ready(Ok(reject(
                    req,
                    AppError::internal("AppState not available"),
                ))));
            }
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                // Publish the identity BEFORE calling the downstream service.
                req.extensions_mut().insert(CurrentUser {
                    id: claims.sub,
                    role: claims.role,
                });

                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(e) => {
                tracing::debug!(reason = %e, "token verification failed");
                Box::pin(ready(Ok(reject(
                    req,
                    AppError::unauthorized("Invalid token"),
                ))))
            }
        }
    }
}

/// Pull the token out of `Bearer <token>`.
///
/// The header must split on a single space into exactly two parts, the first
/// being `Bearer` and the second non-empty. Anything else is a 401.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let auth_value =
        header_value.ok_or_else(|| AppError::unauthorized("Authorization header missing"))?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized("Bearer token format is required"))?;

    let parts: Vec<&str> = auth_str.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized("Bearer token format is required"));
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::bearer_token;

    fn parse(value: &'static str) -> Result<String, crate::AppError> {
        bearer_token(Some(&HeaderValue::from_static(value)))
    }

    #[test]
    fn accepts_well_formed_header() {
        assert_eq!(parse("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(bearer_token(None).is_err());
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert!(parse("Token xyz").is_err());
        assert!(parse("bearer xyz").is_err());
        assert!(parse("Basic dXNlcjpwYXNz").is_err());
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse("").is_err());
        assert!(parse("Bearer").is_err());
        assert!(parse("Bearer ").is_err());
        assert!(parse("Bearer a b").is_err());
        // Double space splits into three parts.
        assert!(parse("Bearer  token").is_err());
    }
}
