//! Login against a mocked user store, then use the issued token on a gated
//! listing route.

mod common;

use actix_web::http::header;
use actix_web::{test, web, App};
use backend::entities::users;
use backend::services::password::hash_password;
use backend::{routes, AppState};
use common::{no_complaint_rows, security};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;
use time::macros::datetime;

fn official_account(password: &str) -> users::Model {
    users::Model {
        id: 7,
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        role: "official".to_string(),
        password_hash: hash_password(password).unwrap(),
        created_at: datetime!(2026-08-01 0:00 UTC),
    }
}

#[actix_web::test]
async fn login_then_list_complaints() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![official_account("hunter2hunter2")]])
        .append_query_results([no_complaint_rows()])
        .into_connection();
    let state = web::Data::new(AppState::new(conn, security()));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(routes::configure),
    )
    .await;

    let login = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({
            "email": "asha@example.com",
            "password": "hunter2hunter2",
        }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["role"], "official");
    assert!(body["user"].get("password_hash").is_none());
    let token = body["token"].as_str().expect("token in response");

    let listing = test::TestRequest::get()
        .uri("/api/v1/allcomplaints")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, listing).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], serde_json::json!([]));
}

#[actix_web::test]
async fn unknown_email_and_wrong_password_share_one_message() {
    // Unknown email: the user lookup comes back empty.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let state = web::Data::new(AppState::new(conn, security()));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "email": "nobody@example.com",
                "password": "hunter2hunter2",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 401);
    let unknown_email: Value = test::read_body_json(resp).await;

    // Wrong password: the user exists but the hash does not match.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![official_account("hunter2hunter2")]])
        .into_connection();
    let state = web::Data::new(AppState::new(conn, security()));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "email": "asha@example.com",
                "password": "wrong-password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 401);
    let wrong_password: Value = test::read_body_json(resp).await;

    assert_eq!(unknown_email["error"], wrong_password["error"]);
}
