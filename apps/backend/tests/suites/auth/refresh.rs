use std::time::{SystemTime, UNIX_EPOCH};

use academy_backend::auth::claims::TokenType;
use academy_backend::auth::jwt::{verify_access_token, verify_refresh_token};
use academy_backend::routes::auth::RefreshTokenResponse;
use academy_backend::state::AppState;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use serde_json::json;

use crate::common::assert_problem_details_structure;
use crate::support::auth::{
    bearer, mint_access, mint_expired_refresh, mint_refresh, test_security, TEST_SUB,
};
use crate::support::create_test_app;

fn refresh_request(body: serde_json::Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn test_refresh_mints_new_token_pair() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let refresh_token = mint_refresh(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security.clone()))
        .build()
        .await;

    let before = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let resp = test::call_service(
        &app,
        refresh_request(json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: RefreshTokenResponse = test::read_body_json(resp).await;
    assert_eq!(body.token_type, "bearer");
    assert_eq!(body.expires_in, Some(900));
    let expires_at = body.expires_at.expect("expires_at");
    assert!(expires_at >= before + 900 && expires_at <= before + 902);

    let access = verify_access_token(&body.access_token, &security)?;
    assert_eq!(access.sub.as_deref(), Some(TEST_SUB));
    assert_eq!(access.email.as_deref(), Some("a@example.com"));
    assert_eq!(access.token_type, Some(TokenType::Access));

    let rotated = body.refresh_token.expect("rotated refresh token");
    let rotated_claims = verify_refresh_token(&rotated, &security)?;
    assert_eq!(rotated_claims.sub.as_deref(), Some(TEST_SUB));
    Ok(())
}

#[actix_web::test]
async fn test_refreshed_access_token_authenticates() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let refresh_token = mint_refresh(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(
        &app,
        refresh_request(json!({ "refresh_token": refresh_token })),
    )
    .await;
    let body: RefreshTokenResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((AUTHORIZATION, bearer(&body.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["user_id"], TEST_SUB);
    assert_eq!(me["full_name"], "a");
    Ok(())
}

#[actix_web::test]
async fn test_access_token_cannot_refresh() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let access_token = mint_access(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(
        &app,
        refresh_request(json!({ "refresh_token": access_token })),
    )
    .await;

    assert_problem_details_structure(resp, 401, "TOKEN_INVALID", "Invalid token type").await;
    Ok(())
}

#[actix_web::test]
async fn test_expired_refresh_token() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let refresh_token = mint_expired_refresh(TEST_SUB, Some("a@example.com"), &security);
    let app = create_test_app(AppState::for_tests(security)).build().await;

    let resp = test::call_service(
        &app,
        refresh_request(json!({ "refresh_token": refresh_token })),
    )
    .await;

    assert_problem_details_structure(resp, 401, "TOKEN_EXPIRED", "Token expired").await;
    Ok(())
}

#[actix_web::test]
async fn test_missing_refresh_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    for body in [json!({}), json!({ "refresh_token": "" }), json!({ "refresh_token": "   " })] {
        let resp = test::call_service(&app, refresh_request(body)).await;
        assert_problem_details_structure(
            resp,
            400,
            "MISSING_REFRESH_TOKEN",
            "refresh_token is required",
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
    assert!(!problem.detail.is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_garbage_refresh_token_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::for_tests(test_security()))
        .build()
        .await;

    let resp = test::call_service(
        &app,
        refresh_request(json!({ "refresh_token": "abc.def.ghi" })),
    )
    .await;

    assert_problem_details(resp, "TOKEN_INVALID", StatusCode::UNAUTHORIZED).await;
    Ok(())
}
