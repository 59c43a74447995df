pub mod auth_gate;
pub mod cors;
pub mod role_gate;

pub use auth_gate::AuthGate;
pub use cors::cors_middleware;
pub use role_gate::RoleGate;
