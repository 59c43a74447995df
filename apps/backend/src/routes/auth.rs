use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::domain::Role;
use crate::error::AppError;
use crate::repos::users;
use crate::services::password::{hash_password, verify_password};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::bad_request("A valid email is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    let db = app_state.require_db()?;

    let password_hash = hash_password(&req.password)?;
    let user = users::create(db, req.name.trim(), req.email.trim(), &password_hash).await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User created successfully".to_string(),
        user_id: user.id,
    }))
}

/// Unknown email and wrong password share one response so the endpoint
/// cannot be used to probe which emails exist.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;

    let user = users::find_by_email(db, req.email.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|e| AppError::internal(format!("Stored role is invalid: {e}")))?;

    let token = mint_access_token(user.id, role, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Successfully logged in".to_string(),
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)));
}
