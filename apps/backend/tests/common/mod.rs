#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::SystemTime;

use backend::{mint_access_token, Role, SecurityConfig};
use sea_orm::Value;

pub const SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(SECRET.as_bytes())
}

/// `Bearer <token>` for a user signed with the test secret.
pub fn bearer(user_id: i64, role: Role) -> String {
    bearer_at(user_id, role, SystemTime::now())
}

pub fn bearer_at(user_id: i64, role: Role, now: SystemTime) -> String {
    let token = mint_access_token(user_id, role, now, &security()).expect("mint token");
    format!("Bearer {token}")
}

/// An empty result set for the raw complaint listing statements.
pub fn no_complaint_rows() -> Vec<BTreeMap<&'static str, Value>> {
    Vec::new()
}
