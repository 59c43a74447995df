#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, TokenError};
pub use config::db::{db_url, DbProfile};
pub use domain::Role;
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use infra::db::connect_db;
pub use middleware::auth_gate::AuthGate;
pub use middleware::cors::cors_middleware;
pub use middleware::role_gate::RoleGate;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
