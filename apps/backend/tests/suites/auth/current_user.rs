use std::sync::Arc;

use academy_backend::auth::user::{Role, User};
use academy_backend::profile::Profile;
use academy_backend::state::builder::build_state;
use academy_backend::state::AppState;
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use uuid::Uuid;

use crate::common::assert_problem_details_structure;
use crate::support::auth::{
    bearer, mint_access, mint_expired_access, mint_refresh, test_security, TEST_SUB,
};
use crate::support::create_test_app;
use crate::support::profile_stores::{FailingProfileStore, InMemoryProfileStore};

fn me_request(authorization: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::get().uri("/api/v1/auth/me");
    if let Some(value) = authorization {
        req = req.insert_header((AUTHORIZATION, value));
    }
    req.to_request()
}

#[actix_web::test]
async fn test_missing_header_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    let resp = test::call_service(&app, me_request(None)).await;

    assert_problem_details_structure(
        resp,
        401,
        "UNAUTHORIZED_MISSING_BEARER",
        "Missing or malformed Bearer token",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_malformed_header_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    for header in ["Basic abc", "Bearer", "Bearer a b", "token-without-scheme"] {
        let resp = test::call_service(&app, me_request(Some(header))).await;
        assert_problem_details(
            resp,
            "UNAUTHORIZED_MISSING_BEARER",
            StatusCode::UNAUTHORIZED,
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_garbage_token_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    let resp = test::call_service(&app, me_request(Some("Bearer not.a.jwt"))).await;

    assert_problem_details_structure(
        resp,
        401,
        "TOKEN_INVALID",
        "Invalid authentication credentials",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_expired_token() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_expired_access(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;

    assert_problem_details_structure(resp, 401, "TOKEN_EXPIRED", "Token expired").await;
    Ok(())
}

#[actix_web::test]
async fn test_refresh_token_cannot_authenticate() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_refresh(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;

    assert_problem_details_structure(resp, 401, "TOKEN_INVALID", "Invalid token type").await;
    Ok(())
}

#[actix_web::test]
async fn test_token_without_email_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_access(TEST_SUB, None, &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;

    assert_problem_details_structure(resp, 401, "TOKEN_INVALID", "Invalid token payload").await;
    Ok(())
}

#[actix_web::test]
async fn test_non_uuid_subject_is_unprocessable() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_access("not-a-uuid", Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;

    assert_problem_details_structure(
        resp,
        422,
        "VALIDATION_ERROR",
        "Invalid user ID format: not-a-uuid",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_test_mode_returns_fallback_identity() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_access(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({
            "user_id": TEST_SUB,
            "full_name": "a",
            "email": "a@example.com",
            "role": "student",
        })
    );
    Ok(())
}

#[actix_web::test]
async fn test_stored_profile_is_authoritative() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let user_id = Uuid::parse_str(TEST_SUB)?;
    let store = Arc::new(InMemoryProfileStore::default().with_profile(
        user_id,
        Profile {
            full_name: "Grace Hopper".to_string(),
            email: "grace@academy.test".to_string(),
            role: Role::Admin,
        },
    ));
    let token = mint_access(TEST_SUB, Some("a@example.com"), &security);
    let state = build_state()
        .with_security(security)
        .with_profile_store(store.clone())
        .build();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user: User = test::read_body_json(resp).await;
    assert_eq!(user.full_name, "Grace Hopper");
    assert_eq!(user.email, "grace@academy.test");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(store.calls(), 1);
    Ok(())
}

#[actix_web::test]
async fn test_failing_store_still_authenticates() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let token = mint_access(TEST_SUB, Some("learner@example.com"), &security);
    let state = build_state()
        .with_security(security)
        .with_profile_store(Arc::new(FailingProfileStore))
        .build();
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, me_request(Some(&bearer(&token)))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user: User = test::read_body_json(resp).await;
    assert_eq!(user.full_name, "learner");
    assert_eq!(user.email, "learner@example.com");
    assert_eq!(user.role, Role::Student);
    Ok(())
}

#[actix_web::test]
async fn test_error_trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    let resp = test::call_service(&app, me_request(None)).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");
    let problem =
        assert_problem_details(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED)
            .await;
    assert_eq!(problem.trace_id, request_id);
    Ok(())
}
