use actix_web::{web, HttpResponse};

use crate::state::app_state::AppState;
use crate::AppError;

/// Liveness probe; pings the database when one is configured.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if let Some(db) = &app_state.db {
        db.ping()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "database ping failed");
                AppError::db("db not connected")
            })?;
    }
    Ok(HttpResponse::Ok().body("ok"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
