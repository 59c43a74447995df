//! Authorization gate.
//!
//! Checks the identity published by [`AuthGate`](super::auth_gate::AuthGate)
//! against a fixed set of acceptable roles. Must be mounted inside an
//! authenticated scope; finding no identity in the request extensions is a
//! wiring bug and fails closed with a 500, never a pass.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::domain::Role;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::middleware::auth_gate::reject;

pub struct RoleGate {
    allowed: &'static [Role],
}

impl RoleGate {
    /// Gate a scope or resource to the given roles.
    pub fn allow(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateMiddleware {
            service,
            allowed: self.allowed,
        }))
    }
}

pub struct RoleGateMiddleware<S> {
    service: S,
    allowed: &'static [Role],
}

impl<S, B> Service<ServiceRequest> for RoleGateMiddleware<S>
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
        let identity = req.extensions().get::<CurrentUser>().copied();

        match identity {
            None => Box::pin(ready(Ok(reject(
                req,
                AppError::internal("User role not found in request context"),
            )))),
            Some(user) if self.allowed.contains(&user.role) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Some(user) => {
                tracing::debug!(user_id = user.id, role = %user.role, "role not permitted");
                Box::pin(ready(Ok(reject(req, AppError::forbidden()))))
            }
        }
    }
}
