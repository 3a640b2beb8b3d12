use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::claims::subject_claims;
use crate::auth::jwt::{
    create_access_token, create_refresh_token, verify_refresh_token, ACCESS_TOKEN_TTL,
};
use crate::auth::user::User;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: Option<u64>,
    /// Access token expiry (seconds since epoch)
    pub expires_at: Option<u64>,
}

/// Exchange a refresh token for a new access token and a rotated refresh
/// token. The old refresh token stays valid until it expires.
async fn refresh(
    req: web::Json<RefreshTokenRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let presented = req.refresh_token.trim();
    if presented.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::MissingRefreshToken,
            "refresh_token is required",
        ));
    }

    let claims = verify_refresh_token(presented, &app_state.security)?;
    let sub = claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or_else(|| AppError::token_invalid("Invalid refresh token payload"))?;

    let data = subject_claims(&sub, claims.email.as_deref());
    let now = SystemTime::now();
    let access_token = create_access_token(&data, None, now, &app_state.security)?;
    let refresh_token = create_refresh_token(&data, None, now, &app_state.security)?;

    let expires_in = ACCESS_TOKEN_TTL.as_secs();
    let issued_at = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs();

    tracing::info!(%sub, "refreshed access token");

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        access_token,
        refresh_token: Some(refresh_token),
        token_type: "bearer".to_string(),
        expires_in: Some(expires_in),
        expires_at: Some(issued_at + expires_in),
    }))
}

async fn me(current_user: CurrentUser) -> web::Json<User> {
    web::Json(current_user.into_inner())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }))
    .route("/refresh", web::post().to(refresh))
    .route("/me", web::get().to(me));
}
