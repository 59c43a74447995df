use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::complaint_filter::ComplaintFilter;
use crate::repos::complaints::{
    self, ComplaintRow, ComplaintUpdateRow, NewComplaint, STATUS_IN_PROGRESS, STATUS_PENDING,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateComplaintRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: i32,
    /// URL of previously uploaded evidence, if any
    #[serde(default)]
    pub evidence: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub message: String,
    pub data: ComplaintRow,
}

#[derive(Debug, Serialize)]
pub struct ComplaintListResponse {
    pub message: String,
    pub data: Vec<ComplaintRow>,
}

#[derive(Debug, Deserialize)]
pub struct AddUpdateRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct AddUpdateResponse {
    pub message: String,
    pub details: ComplaintUpdateRow,
}

pub async fn create(
    user: CurrentUser,
    req: web::Json<CreateComplaintRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.title.trim().len() < 5 {
        return Err(AppError::bad_request("Title must be at least 5 characters"));
    }
    if req.description.trim().len() < 10 {
        return Err(AppError::bad_request(
            "Description must be at least 10 characters",
        ));
    }
    if req.category <= 0 {
        return Err(AppError::bad_request("Invalid category value"));
    }
    if !(-90.0..=90.0).contains(&req.latitude) {
        return Err(AppError::bad_request("Invalid latitude value"));
    }
    if !(-180.0..=180.0).contains(&req.longitude) {
        return Err(AppError::bad_request("Invalid longitude value"));
    }

    let db = app_state.require_db()?;

    let complaint = NewComplaint {
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        category_id: req.category,
        evidence: req.evidence.clone(),
        longitude: req.longitude,
        latitude: req.latitude,
        is_public: req.is_public,
    };

    let row = complaints::insert(db, user.id, &complaint, STATUS_PENDING).await?;

    tracing::info!(complaint_id = row.id, user_id = user.id, "complaint filed");

    Ok(HttpResponse::Ok().json(ComplaintResponse {
        message: "Complaint added successfully".to_string(),
        data: row,
    }))
}

pub async fn list_all(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let data = complaints::list_all(db).await?;

    Ok(HttpResponse::Ok().json(ComplaintListResponse {
        message: "Complaints retrieved successfully".to_string(),
        data,
    }))
}

pub async fn list_filtered(
    query: web::Query<ComplaintFilter>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let filter = query.into_inner().normalized();
    let data = complaints::list_filtered(db, &filter).await?;

    Ok(HttpResponse::Ok().json(ComplaintListResponse {
        message: "Complaints retrieved successfully".to_string(),
        data,
    }))
}

pub async fn list_mine(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let data = complaints::list_for_user(db, user.id).await?;

    Ok(HttpResponse::Ok().json(ComplaintListResponse {
        message: "Complaints retrieved successfully".to_string(),
        data,
    }))
}

/// Record an official's progress note and move the complaint to
/// `In_Progress`.
pub async fn add_update(
    path: web::Path<i64>,
    user: CurrentUser,
    req: web::Json<AddUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let complaint_id = path.into_inner();

    if req.comment.trim().len() < 10 {
        return Err(AppError::bad_request(
            "Comment must be at least 10 characters",
        ));
    }

    let db = app_state.require_db()?;

    if !complaints::exists(db, complaint_id).await? {
        return Err(AppError::not_found("Complaint not found"));
    }

    let update = complaints::insert_update(db, complaint_id, user.id, req.comment.trim()).await?;
    complaints::set_status(db, complaint_id, STATUS_IN_PROGRESS).await?;

    Ok(HttpResponse::Ok().json(AddUpdateResponse {
        message: "Status updated".to_string(),
        details: update,
    }))
}

pub fn configure_official_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/complaints/{id}/updates").route(web::post().to(add_update)));
}
