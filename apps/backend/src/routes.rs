//! Route registration.
//!
//! Gate ordering is fixed by scope nesting: the authentication gate wraps the
//! outer protected scope, role gates wrap the resources and sub-scopes inside
//! it, so authentication always runs before authorization.

use actix_web::{guard, web};

use crate::domain::Role;
use crate::middleware::auth_gate::AuthGate;
use crate::middleware::role_gate::RoleGate;

pub mod auth;
pub mod categories;
pub mod complaints;
pub mod users;

const USER_ONLY: &[Role] = &[Role::User];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const OFFICIAL_ONLY: &[Role] = &[Role::Official];
const OFFICIAL_OR_ADMIN: &[Role] = &[Role::Official, Role::Admin];

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure_routes)
            .configure(categories::configure_routes)
            .service(
                web::scope("")
                    .wrap(AuthGate)
                    .service(
                        web::resource("/allcomplaints")
                            .route(web::get().to(complaints::list_all))
                            .wrap(RoleGate::allow(OFFICIAL_OR_ADMIN)),
                    )
                    .service(
                        web::resource("/complaints")
                            .guard(guard::Get())
                            .route(web::get().to(complaints::list_filtered))
                            .wrap(RoleGate::allow(OFFICIAL_OR_ADMIN)),
                    )
                    .service(
                        web::resource("/complaints")
                            .guard(guard::Post())
                            .route(web::post().to(complaints::create))
                            .wrap(RoleGate::allow(USER_ONLY)),
                    )
                    .service(
                        web::resource("/complaints/my")
                            .route(web::get().to(complaints::list_mine))
                            .wrap(RoleGate::allow(USER_ONLY)),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(RoleGate::allow(ADMIN_ONLY))
                            .configure(users::configure_admin_routes),
                    )
                    .service(
                        web::scope("/official")
                            .wrap(RoleGate::allow(OFFICIAL_ONLY))
                            .configure(complaints::configure_official_routes),
                    ),
            ),
    );
    cfg.configure(crate::health::configure);
}
