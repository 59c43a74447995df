//! Admin-only user management.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::entities::users;
use crate::error::AppError;
use crate::repos::users as users_repo;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<users::Model>,
}

#[derive(Debug, Serialize)]
pub struct OfficialsResponse {
    pub officials: Vec<users::Model>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateRoleResponse {
    pub message: String,
    pub userid: i64,
    pub role: Role,
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let users = users_repo::list_non_admin(db).await?;

    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

/// Promotion is one-way by design: the only role an admin can assign through
/// this endpoint is `official`.
async fn update_role(
    path: web::Path<i64>,
    req: web::Json<UpdateRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let role = match req.role.parse::<Role>() {
        Ok(Role::Official) => Role::Official,
        _ => {
            return Err(AppError::bad_request(
                "Only the official role can be assigned",
            ))
        }
    };

    let db = app_state.require_db()?;

    if !users_repo::update_role(db, user_id, role).await? {
        return Err(AppError::not_found("User not found with the specified ID"));
    }

    tracing::info!(user_id, role = %role, "user role updated");

    Ok(HttpResponse::Ok().json(UpdateRoleResponse {
        message: "User role updated successfully".to_string(),
        userid: user_id,
        role,
    }))
}

async fn list_officials(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let officials = users_repo::list_officials(db).await?;

    Ok(HttpResponse::Ok().json(OfficialsResponse { officials }))
}

pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users").route(web::get().to(list_users)))
        .service(web::resource("/users/{id}/role").route(web::post().to(update_role)))
        .service(web::resource("/officials").route(web::get().to(list_officials)));
}
