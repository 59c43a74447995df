use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::entities::categories;
use crate::error::AppError;
use crate::repos::categories as categories_repo;
use crate::services::category_cache::CacheSource;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub data: Vec<categories::Model>,
    pub source: CacheSource,
}

/// Read-through: served from the cache inside the TTL window, otherwise
/// refreshed from the database.
async fn get_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;

    let (data, source) = app_state
        .categories
        .get(|| categories_repo::list_ordered(db))
        .await?;

    Ok(HttpResponse::Ok().json(CategoriesResponse { data, source }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/categories").route(web::get().to(get_categories)));
}
