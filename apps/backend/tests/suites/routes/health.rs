use actix_web::test;
use roshambo::state::app_state::AppState;
use serde_json::Value;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn reports_db_and_migration_status() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"]
        .as_str()
        .is_some_and(|m| m.contains("progression")));
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn stays_up_without_a_database() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::without_db()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["db_error"], "Database is not configured");
    Ok(())
}
