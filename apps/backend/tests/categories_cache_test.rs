//! HTTP-level behavior of the category cache: the second read inside the TTL
//! window is served from the cache and never touches the database.

mod common;

use actix_web::{test, web, App};
use backend::entities::categories;
use backend::{routes, AppState};
use common::security;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;

fn sample() -> Vec<categories::Model> {
    vec![
        categories::Model {
            id: 2,
            name: "Roads".to_string(),
        },
        categories::Model {
            id: 1,
            name: "Water".to_string(),
        },
    ]
}

#[actix_web::test]
async fn second_read_within_ttl_is_served_from_cache() {
    // Exactly one result set is queued: a second database query would fail,
    // so a passing second request proves the cache answered it.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([sample()])
        .into_connection();
    let state = web::Data::new(AppState::new(conn, security()));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(routes::configure),
    )
    .await;

    let first = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/categories").to_request(),
    )
    .await;
    assert_eq!(first.status().as_u16(), 200);
    let first_body: Value = test::read_body_json(first).await;
    assert_eq!(first_body["source"], "database");

    let second = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/categories").to_request(),
    )
    .await;
    assert_eq!(second.status().as_u16(), 200);
    let second_body: Value = test::read_body_json(second).await;

    assert_eq!(second_body["source"], "cache");
    assert_eq!(first_body["data"], second_body["data"]);
    assert_eq!(second_body["data"][0]["name"], "Roads");
}
