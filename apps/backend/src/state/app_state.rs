use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::services::category_cache::CategoryCache;

use super::security_config::SecurityConfig;

/// Application state containing shared resources.
///
/// Constructed once at startup and handed to the HTTP server; components
/// receive their collaborators through it instead of reaching for globals.
// `sea_orm::DatabaseConnection` only implements `Clone` when the `mock`
// feature is disabled, so the derived `Clone` is gated to match. `AppState`
// is always shared through `web::Data` (an `Arc`) and never cloned directly.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
#[derive(Debug)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Process-wide category cache (1h TTL)
    pub categories: Arc<CategoryCache>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            categories: Arc::new(CategoryCache::new()),
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            categories: Arc::new(CategoryCache::new()),
        }
    }

    /// The database handle, or a 500 when the state was built without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::internal("Database connection not available"))
    }
}
